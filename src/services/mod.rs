pub mod droid;
pub mod job_scraper;
pub mod listing_enumerator;
pub mod listing_extractor;
pub mod page;
pub mod panel_loader;
pub mod selectors;
pub mod snapshot;
pub mod webdriver_page;

pub use droid::*;
pub use job_scraper::*;
pub use listing_enumerator::*;
pub use listing_extractor::*;
pub use page::*;
pub use panel_loader::*;
pub use snapshot::*;
pub use webdriver_page::*;
