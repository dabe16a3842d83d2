use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use thirtyfour::prelude::*;

use crate::error::ScrapeError;

use super::{ListingScope, ResultsPage, ScrollPanel};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

// innerText rather than the WebDriver text endpoint, which reports "" for
// detail panels that are not currently displayed.
async fn rendered_text(element: &WebElement) -> Result<String, ScrapeError> {
    Ok(element.prop("innerText").await?.unwrap_or_default())
}

#[async_trait(?Send)]
impl ListingScope for WebElement {
    async fn inner_text(&self, selector: &str) -> Result<String, ScrapeError> {
        let element = self.find(By::Css(selector)).await?;
        rendered_text(&element).await
    }

    async fn all_inner_texts(&self, selector: &str) -> Result<Vec<String>, ScrapeError> {
        let mut texts = vec![];
        for element in self.find_all(By::Css(selector)).await? {
            texts.push(rendered_text(&element).await?);
        }
        Ok(texts)
    }

    async fn all_attributes(
        &self,
        selector: &str,
        name: &str,
    ) -> Result<Vec<Option<String>>, ScrapeError> {
        let mut values = vec![];
        for element in self.find_all(By::Css(selector)).await? {
            values.push(element.attr(name).await?);
        }
        Ok(values)
    }

    async fn locate_all(&self, selector: &str) -> Result<Vec<WebElement>, ScrapeError> {
        Ok(self.find_all(By::Css(selector)).await?)
    }
}

#[async_trait(?Send)]
impl ResultsPage for WebDriver {
    type Scope = WebElement;

    async fn wait_for_any(&self, selector: &str, timeout: Duration) -> Result<bool, ScrapeError> {
        Ok(self
            .query(By::Css(selector))
            .wait(timeout, POLL_INTERVAL)
            .exists()
            .await?)
    }

    async fn count_matches(&self, selector: &str) -> Result<usize, ScrapeError> {
        Ok(self.find_all(By::Css(selector)).await?.len())
    }

    async fn locate_all(&self, selector: &str) -> Result<Vec<WebElement>, ScrapeError> {
        Ok(self.find_all(By::Css(selector)).await?)
    }
}

/// The `role=tree` container holding the listings.
pub struct ResultsTree {
    pub driver: WebDriver,
    pub element: WebElement,
}

#[async_trait(?Send)]
impl ScrollPanel for ResultsTree {
    async fn focus(&self) -> Result<(), ScrapeError> {
        Ok(self.element.click().await?)
    }

    async fn scroll(&self, pixels: i64) -> Result<(), ScrapeError> {
        // Scroll both the tree and the window; depending on layout either one
        // is the scrolling box that triggers the next batch.
        self.driver
            .execute(
                "arguments[0].scrollBy(0, arguments[1]); window.scrollBy(0, arguments[1]);",
                vec![self.element.to_json()?, json!(pixels)],
            )
            .await?;
        Ok(())
    }

    async fn layout_signal(&self) -> Result<f64, ScrapeError> {
        Ok(self.element.rect().await?.y)
    }
}
