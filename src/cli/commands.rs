use std::path::Path;
use std::sync::Arc;

use crate::analysis;
use crate::app::{AppContext, GleanError, Result};
use crate::server;

pub async fn serve(ctx: AppContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut listen = ctx.config.server.clone();
    if let Some(host) = host {
        listen.host = host;
    }
    if let Some(port) = port {
        listen.port = port;
    }

    server::serve(Arc::new(ctx), &listen.bind_address()).await
}

pub async fn scrape(ctx: &AppContext, query: &str) -> Result<()> {
    let result = ctx.scrape(query).await?;
    print_json(&result)
}

pub async fn scrape_multiple(ctx: &AppContext, query: &str, num_results: Option<usize>) -> Result<()> {
    let outcome = ctx.scrape_multiple(query, num_results).await?;
    for error in &outcome.errors {
        eprintln!("  Skipped {}: {}", error.url, error.error);
    }
    eprintln!(
        "{}/{} pages extracted",
        outcome.stats.successful, outcome.stats.found
    );
    print_json(&outcome)
}

pub async fn analyze(ctx: &AppContext, query: &str, out: &Path) -> Result<()> {
    let result = ctx.scrape(query).await?;
    std::fs::write(out, &result.content)?;
    println!("Content of {} saved to {}", result.url, out.display());

    println!("\n{}", analysis::analyze(&result.content));
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| GleanError::ExtractionFailure(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
