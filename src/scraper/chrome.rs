use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    BlockPattern, EnableParams, SetBlockedUrLsParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};

use crate::app::{GleanError, Result};
use crate::scraper::config::ScraperConfig;
use crate::scraper::{Browser, PageSession};

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Chrome-based browser using chromiumoxide
pub struct ChromeBrowser {
    browser: CdpBrowser,
    config: ScraperConfig,
    semaphore: Arc<Semaphore>,
    handler: JoinHandle<()>,
}

impl ChromeBrowser {
    /// Launch Chrome with the given configuration
    pub async fn new(config: ScraperConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer");

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| GleanError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = CdpBrowser::launch(browser_config).await.map_err(|e| {
            GleanError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // The CDP connection only makes progress while the handler is polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
        });

        tracing::info!(
            "Browser launched (headless: {}, max tabs: {})",
            config.headless,
            config.max_concurrency
        );

        let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));

        Ok(Self {
            browser,
            config,
            semaphore,
            handler,
        })
    }

    async fn prepare_page(&self, page: &Page) -> Result<()> {
        if let Some(ref ua) = self.config.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| GleanError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        if let Some(blocking) = blocking_params(&self.config) {
            page.execute(EnableParams::default())
                .await
                .map_err(|e| GleanError::Browser(format!("Failed to enable network domain: {}", e)))?;
            page.execute(blocking)
                .await
                .map_err(|e| GleanError::Browser(format!("Failed to block resources: {}", e)))?;
        }

        Ok(())
    }
}

/// `Network.setBlockedURLs` parameters, or `None` when nothing is blocked.
fn blocking_params(config: &ScraperConfig) -> Option<SetBlockedUrLsParams> {
    let patterns = config.blocked_url_patterns();
    if patterns.is_empty() {
        return None;
    }
    Some(
        SetBlockedUrLsParams::builder()
            .url_patterns(patterns.into_iter().map(|p| BlockPattern::new(p, true)))
            .build(),
    )
}

impl Drop for ChromeBrowser {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl Browser for ChromeBrowser {
    async fn new_page(&self) -> Result<Box<dyn PageSession>> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| GleanError::Browser(format!("Semaphore error: {}", e)))?;

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| GleanError::Browser(format!("Failed to create page: {}", e)))?;

        if let Err(e) = self.prepare_page(&page).await {
            let _ = page.close().await;
            return Err(e);
        }

        Ok(Box::new(ChromePage {
            page,
            _permit: permit,
        }))
    }
}

/// One Chrome tab. Holds a concurrency permit until dropped.
struct ChromePage {
    page: Page,
    _permit: OwnedSemaphorePermit,
}

#[async_trait]
impl PageSession for ChromePage {
    async fn navigate(&self, url: &str, limit: Duration) -> Result<()> {
        match timeout(limit, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(GleanError::Browser(format!("Navigation to {} failed: {}", url, e))),
            Err(_) => Err(GleanError::Browser(format!(
                "Navigation to {} timed out after {}ms",
                url,
                limit.as_millis()
            ))),
        }
    }

    async fn wait_for_selector(&self, selector: &str, limit: Duration) -> Result<()> {
        let deadline = Instant::now() + limit;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(GleanError::Browser(format!(
                    "Timed out after {}ms waiting for {}",
                    limit.as_millis(),
                    selector
                )));
            }
            sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn attribute_values(&self, selector: &str, name: &str) -> Result<Vec<String>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| GleanError::Browser(format!("Query {} failed: {}", selector, e)))?;

        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            if let Ok(Some(value)) = element.attribute(name).await {
                values.push(value);
            }
        }
        Ok(values)
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| GleanError::Browser(format!("Failed to read page URL: {}", e)))
    }

    async fn html(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| GleanError::Browser(format!("Failed to read page content: {}", e)))
    }

    async fn click(&self, selector: &str) -> Result<bool> {
        let Ok(element) = self.page.find_element(selector).await else {
            return Ok(false);
        };
        element
            .click()
            .await
            .map_err(|e| GleanError::Browser(format!("Click on {} failed: {}", selector, e)))?;
        Ok(true)
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| GleanError::Browser(format!("Input {} not found: {}", selector, e)))?;
        element
            .click()
            .await
            .map_err(|e| GleanError::Browser(format!("Focus on {} failed: {}", selector, e)))?;
        element
            .type_str(text)
            .await
            .map_err(|e| GleanError::Browser(format!("Typing into {} failed: {}", selector, e)))?;
        Ok(())
    }

    async fn wait_for_navigation(&self, limit: Duration) -> Result<()> {
        match timeout(limit, self.page.wait_for_navigation()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(GleanError::Browser(format!("Navigation failed: {}", e))),
            Err(_) => Err(GleanError::Browser(format!(
                "Navigation did not finish within {}ms",
                limit.as_millis()
            ))),
        }
    }

    async fn close(&self) -> Result<()> {
        self.page
            .clone()
            .close()
            .await
            .map_err(|e| GleanError::Browser(format!("Failed to close page: {}", e)))
    }
}
