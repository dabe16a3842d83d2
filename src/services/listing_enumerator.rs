use std::time::Duration;

use crate::{domain::ListingRecord, error::ScrapeError};

use super::{extract_listing, selectors, ResultsPage};

/// Extracts every listing currently loaded in the results panel, in order.
///
/// No listing showing up within `wait` means the query had no results and
/// yields an empty list.
pub async fn enumerate_listings<P: ResultsPage>(
    page: &P,
    wait: Duration,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    if !page.wait_for_any(selectors::LISTING_CONTAINERS, wait).await? {
        log::debug!("No listings appeared within {:?}", wait);
        return Ok(vec![]);
    }

    let jobs_count = page.count_matches(selectors::LISTING_CONTAINERS).await?;
    log::debug!("Parse {} jobs", jobs_count);

    // Containers and detail panels are separate queries matched up by position.
    let job_details = page.locate_all(selectors::DETAIL_PANELS).await?;
    if job_details.len() < jobs_count {
        log::error!(
            "Found {} listings but only {} detail panels",
            jobs_count,
            job_details.len()
        );
        return Err(ScrapeError::MissingElement(
            selectors::DETAIL_PANELS.to_string(),
        ));
    }
    if job_details.len() > jobs_count {
        log::warn!(
            "Found {} listings but {} detail panels, ignoring the extra panels",
            jobs_count,
            job_details.len()
        );
    }

    let mut records = Vec::with_capacity(jobs_count);
    for job_element in job_details.iter().take(jobs_count) {
        records.push(extract_listing(job_element).await?);
    }

    Ok(records)
}
