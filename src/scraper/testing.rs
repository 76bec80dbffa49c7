//! Scripted in-memory browser for crawl tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::app::{GleanError, Result};
use crate::scraper::{Browser, PageSession};

#[derive(Debug, Clone)]
enum Route {
    Page { html: String, final_url: String },
    Fail(String),
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<String, Route>>,
    visits: Mutex<Vec<String>>,
    typed: Mutex<Vec<String>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// A fake web: URLs map to fixed HTML or to a navigation failure.
#[derive(Clone, Default)]
pub struct FakeBrowser {
    shared: Arc<Shared>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.redirect(url, url, html)
    }

    /// Serve `html` for `url`, reporting `final_url` as the landed URL.
    pub fn redirect(self, url: &str, final_url: &str, html: &str) -> Self {
        self.route(
            url,
            Route::Page {
                html: html.to_string(),
                final_url: final_url.to_string(),
            },
        )
    }

    pub fn failing(self, url: &str, reason: &str) -> Self {
        self.route(url, Route::Fail(reason.to_string()))
    }

    fn route(self, url: &str, route: Route) -> Self {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert(url.to_string(), route);
        self
    }

    /// Every URL navigated to, in order, across all tabs.
    pub fn visits(&self) -> Vec<String> {
        self.shared.visits.lock().unwrap().clone()
    }

    pub fn typed(&self) -> Vec<String> {
        self.shared.typed.lock().unwrap().clone()
    }

    pub fn opened(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.shared.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn new_page(&self) -> Result<Box<dyn PageSession>> {
        self.shared.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePage {
            shared: self.shared.clone(),
            current: Mutex::new(None),
        }))
    }
}

struct FakePage {
    shared: Arc<Shared>,
    current: Mutex<Option<(String, String)>>,
}

impl FakePage {
    fn current_html(&self) -> String {
        self.current
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, html)| html.clone())
            .unwrap_or_default()
    }

    fn select_attr(&self, selector: &str, name: &str) -> Result<Vec<Option<String>>> {
        let selector = Selector::parse(selector)
            .map_err(|e| GleanError::Browser(format!("bad selector {selector}: {e}")))?;
        let document = Html::parse_document(&self.current_html());
        Ok(document
            .select(&selector)
            .map(|element| element.value().attr(name).map(str::to_string))
            .collect())
    }
}

#[async_trait]
impl PageSession for FakePage {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<()> {
        self.shared.visits.lock().unwrap().push(url.to_string());
        let route = self.shared.routes.lock().unwrap().get(url).cloned();
        match route {
            Some(Route::Page { html, final_url }) => {
                *self.current.lock().unwrap() = Some((final_url, html));
                Ok(())
            }
            Some(Route::Fail(reason)) => Err(GleanError::Browser(reason)),
            None => Err(GleanError::Browser(format!("net::ERR_NAME_NOT_RESOLVED at {url}"))),
        }
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<()> {
        if self.select_attr(selector, "href")?.is_empty() {
            return Err(GleanError::Browser(format!("timed out waiting for {selector}")));
        }
        Ok(())
    }

    async fn attribute_values(&self, selector: &str, name: &str) -> Result<Vec<String>> {
        Ok(self
            .select_attr(selector, name)?
            .into_iter()
            .flatten()
            .collect())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self
            .current
            .lock()
            .unwrap()
            .as_ref()
            .map(|(url, _)| url.clone())
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn html(&self) -> Result<String> {
        Ok(self.current_html())
    }

    /// Clicking a link follows its `href`.
    async fn click(&self, selector: &str) -> Result<bool> {
        let Some(first) = self.select_attr(selector, "href")?.into_iter().next() else {
            return Ok(false);
        };
        if let Some(href) = first {
            self.navigate(&href, Duration::ZERO).await?;
        }
        Ok(true)
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        if self.select_attr(selector, "type")?.is_empty() {
            return Err(GleanError::Browser(format!("no input matches {selector}")));
        }
        self.shared.typed.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn wait_for_navigation(&self, _timeout: Duration) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.shared.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_page_follows_routes() {
        let browser = FakeBrowser::new()
            .page("https://a.example/", "<body><a href='https://b.example/'>b</a></body>")
            .page("https://b.example/", "<body>B</body>");

        tokio_test::block_on(async {
            let page = browser.new_page().await.unwrap();
            page.navigate("https://a.example/", Duration::ZERO).await.unwrap();
            assert!(page.click("a").await.unwrap());
            assert_eq!(page.current_url().await.unwrap(), "https://b.example/");
            assert!(!page.click("button").await.unwrap());
            assert!(page.navigate("https://nowhere.example/", Duration::ZERO).await.is_err());
            page.close().await.unwrap();
        });

        assert_eq!(browser.opened(), 1);
        assert_eq!(browser.closed(), 1);
    }
}
