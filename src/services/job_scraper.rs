use std::path::{Path, PathBuf};

use url::Url;
use uuid::Uuid;

use crate::{
    configuration::{ScraperSettings, WebDriverSettings},
    domain::{build_search_url, ListingRecord},
    error::ScrapeError,
};

use super::{
    enumerate_listings, load_until_stable, selectors, BrowserSession, ScrollPanel,
    SessionLauncher, SnapshotLauncher,
};

pub struct JobScraper {
    pub webdriver: WebDriverSettings,
    pub settings: ScraperSettings,
}

impl JobScraper {
    pub fn new(webdriver: WebDriverSettings, settings: ScraperSettings) -> Self {
        JobScraper {
            webdriver,
            settings,
        }
    }

    pub async fn search(
        &self,
        run_id: Uuid,
        query: &str,
    ) -> Result<Vec<ListingRecord>, ScrapeError> {
        run(
            &self.webdriver,
            &self.settings,
            run_id,
            query,
            self.settings.max_scroll,
        )
        .await
    }

    /// Runs the extraction again over the page source saved by `run_id`.
    pub async fn replay(&self, run_id: Uuid) -> Result<Vec<ListingRecord>, ScrapeError> {
        let dir = self
            .settings
            .snapshot_dir
            .as_deref()
            .ok_or(ScrapeError::SnapshotsDisabled)?;
        let launcher = SnapshotLauncher::from_file(snapshot_path(Path::new(dir), run_id)).await?;

        // A saved page is already complete, there is nothing to wait for.
        let settings = ScraperSettings {
            scroll_settle_millis: 0,
            render_settle_millis: 0,
            listing_wait_millis: 0,
            snapshot_dir: None,
            ..self.settings.clone()
        };

        run(
            &launcher,
            &settings,
            run_id,
            &format!("snapshot {}", run_id),
            settings.max_scroll,
        )
        .await
    }
}

fn snapshot_path(dir: &Path, run_id: Uuid) -> PathBuf {
    dir.join(format!("{}.html", run_id))
}

/// One search, start to finish, in its own browser session.
///
/// The session is closed whether or not scraping succeeded.
pub async fn run<L: SessionLauncher>(
    launcher: &L,
    settings: &ScraperSettings,
    run_id: Uuid,
    query: &str,
    max_scroll: u32,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    let search_url = build_search_url(&settings.search_endpoint, query)?;
    log::info!("[{}] Searching `{}`", run_id, query);

    let session = launcher.launch().await?;
    let result = scrape_results(&session, settings, run_id, &search_url, max_scroll).await;

    if let Err(e) = session.close().await {
        log::error!("[{}] Failed to close browser session: {:?}", run_id, e);
    }

    match &result {
        Ok(records) => log::info!(
            "[{}] Finished parsing `{}`: {} listings",
            run_id,
            query,
            records.len()
        ),
        Err(e) => log::error!("[{}] Search `{}` failed: {:?}", run_id, query, e),
    }

    result
}

async fn scrape_results<S: BrowserSession>(
    session: &S,
    settings: &ScraperSettings,
    run_id: Uuid,
    search_url: &Url,
    max_scroll: u32,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    session.navigate(search_url.as_str()).await?;

    // Listings are rendered client side after the document itself is ready.
    tokio::time::sleep(settings.render_settle()).await;

    let job_tree = session.results_panel(selectors::RESULTS_TREE).await?;
    job_tree.focus().await?;

    let report = load_until_stable(
        &job_tree,
        max_scroll,
        settings.scroll_step_pixels,
        settings.scroll_settle(),
    )
    .await?;
    log::debug!("[{}] Panel loading: {:?}", run_id, report);

    if let Some(dir) = &settings.snapshot_dir {
        save_snapshot(session, Path::new(dir), run_id).await?;
    }

    enumerate_listings(session.page(), settings.listing_wait()).await
}

async fn save_snapshot<S: BrowserSession>(
    session: &S,
    dir: &Path,
    run_id: Uuid,
) -> Result<(), ScrapeError> {
    let source = session.page_source().await?;
    let path = snapshot_path(dir, run_id);

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, source).await?;
    log::debug!("[{}] Saved page source to {}", run_id, path.display());

    Ok(())
}
