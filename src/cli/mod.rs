pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "glean")]
#[command(about = "Turn a search query into clean page text", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/glean/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Interface to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config file)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    /// Print the content of the best page for a query
    Scrape {
        /// Search query
        query: String,
    },
    /// Print the content of several result pages for a query
    ScrapeMultiple {
        /// Search query
        query: String,

        /// Number of result pages to visit (clamped to the configured cap)
        #[arg(short = 'n', long)]
        num_results: Option<usize>,
    },
    /// Scrape a query, save the text and print an analysis of it
    Analyze {
        /// Search query
        #[arg(default_value = "actualités france")]
        query: String,

        /// Where to save the extracted text
        #[arg(short, long, default_value = "content.txt")]
        out: PathBuf,
    },
}
