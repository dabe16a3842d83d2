//! Seams between the scraping pipeline and whatever renders the results page.
//!
//! The live implementation drives a WebDriver session (`webdriver_page`),
//! the snapshot implementation reads a saved page source (`snapshot`).
//! Every method is a suspension point; callers await them strictly in order.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScrapeError;

/// One listing's subtree. Selectors are resolved relative to it.
#[async_trait(?Send)]
pub trait ListingScope: Sized {
    /// Inner text of the first match; a missing element is an error.
    async fn inner_text(&self, selector: &str) -> Result<String, ScrapeError>;

    async fn all_inner_texts(&self, selector: &str) -> Result<Vec<String>, ScrapeError>;

    /// One entry per match, in document order, `None` where the attribute is absent.
    async fn all_attributes(
        &self,
        selector: &str,
        name: &str,
    ) -> Result<Vec<Option<String>>, ScrapeError>;

    async fn locate_all(&self, selector: &str) -> Result<Vec<Self>, ScrapeError>;
}

#[async_trait(?Send)]
pub trait ResultsPage {
    type Scope: ListingScope;

    /// `false` when nothing matched before the timeout ran out.
    async fn wait_for_any(&self, selector: &str, timeout: Duration) -> Result<bool, ScrapeError>;

    async fn count_matches(&self, selector: &str) -> Result<usize, ScrapeError>;

    async fn locate_all(&self, selector: &str) -> Result<Vec<Self::Scope>, ScrapeError>;
}

#[async_trait(?Send)]
pub trait ScrollPanel {
    async fn focus(&self) -> Result<(), ScrapeError>;

    async fn scroll(&self, pixels: i64) -> Result<(), ScrapeError>;

    /// Vertical offset of the panel's bounding box.
    async fn layout_signal(&self) -> Result<f64, ScrapeError>;
}

#[async_trait(?Send)]
pub trait BrowserSession: Sized {
    type Page: ResultsPage;
    type Panel: ScrollPanel;

    async fn navigate(&self, url: &str) -> Result<(), ScrapeError>;

    async fn results_panel(&self, selector: &str) -> Result<Self::Panel, ScrapeError>;

    fn page(&self) -> &Self::Page;

    async fn page_source(&self) -> Result<String, ScrapeError>;

    async fn close(self) -> Result<(), ScrapeError>;
}

#[async_trait(?Send)]
pub trait SessionLauncher {
    type Session: BrowserSession;

    async fn launch(&self) -> Result<Self::Session, ScrapeError>;
}
