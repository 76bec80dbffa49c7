mod query;
mod result;

pub use query::Query;
pub use result::{CrawlStats, ExtractionResult, LinkError, MultiCrawlOutcome, WeatherFields};
