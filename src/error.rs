use thirtyfour::error::WebDriverError;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("webdriver error: {0}")]
    WebDriver(#[from] WebDriverError),

    #[error("no element matches selector `{0}`")]
    MissingElement(String),

    #[error("invalid selector `{0}`")]
    InvalidSelector(String),

    #[error("malformed relative time phrase `{0}`")]
    MalformedTimePhrase(String),

    #[error("invalid search endpoint: {0}")]
    SearchUrl(#[from] url::ParseError),

    #[error("page snapshot io: {0}")]
    Snapshot(#[from] std::io::Error),

    #[error("page snapshots are disabled, set scraper.snapshot_dir")]
    SnapshotsDisabled,
}
