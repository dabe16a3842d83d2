use async_trait::async_trait;
use thirtyfour::{
    error::WebDriverError, prelude::*, CapabilitiesHelper, ChromiumLikeCapabilities,
    DesiredCapabilities, PageLoadStrategy, WebDriver,
};

use crate::{
    configuration::{Browser, WebDriverSettings},
    error::ScrapeError,
};

use super::{BrowserSession, ResultsTree, SessionLauncher};

/// One fresh WebDriver session. Every run gets its own, so nothing carries
/// over between searches.
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(settings: &WebDriverSettings) -> Result<Self, WebDriverError> {
        let server_url = settings.server_url.as_str();

        // Eager returns once the DOM is parsed, without waiting on subresources.
        let driver = match settings.browser {
            Browser::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if settings.headless {
                    caps.set_headless()?;
                }
                caps.set_page_load_strategy(PageLoadStrategy::Eager)?;
                WebDriver::new(server_url, caps).await?
            }
            Browser::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if settings.headless {
                    caps.set_headless()?;
                }
                caps.set_page_load_strategy(PageLoadStrategy::Eager)?;
                WebDriver::new(server_url, caps).await?
            }
        };

        log::info!(
            "Opened {:?} session on {} (headless: {})",
            settings.browser,
            server_url,
            settings.headless
        );

        Ok(Droid { driver })
    }
}

#[async_trait(?Send)]
impl BrowserSession for Droid {
    type Page = WebDriver;
    type Panel = ResultsTree;

    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        Ok(self.driver.goto(url).await?)
    }

    async fn results_panel(&self, selector: &str) -> Result<ResultsTree, ScrapeError> {
        let element = self.driver.find(By::Css(selector)).await?;
        Ok(ResultsTree {
            driver: self.driver.clone(),
            element,
        })
    }

    fn page(&self) -> &WebDriver {
        &self.driver
    }

    async fn page_source(&self) -> Result<String, ScrapeError> {
        Ok(self.driver.source().await?)
    }

    async fn close(self) -> Result<(), ScrapeError> {
        Ok(self.driver.quit().await?)
    }
}

#[async_trait(?Send)]
impl SessionLauncher for WebDriverSettings {
    type Session = Droid;

    async fn launch(&self) -> Result<Droid, ScrapeError> {
        Ok(Droid::new(self).await?)
    }
}
