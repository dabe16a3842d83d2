use crate::{
    domain::{
        text::{
            attach_currency_symbol, clean_many, clean_one, format_post_date,
            is_relative_time_phrase, relative_time_to_date,
        },
        DetailChips, ListingRecord,
    },
    error::ScrapeError,
};

use super::{selectors, ListingScope};

/// Pulls one record out of a listing's detail subtree.
///
/// Title, location and employer must be present; a missing one fails the
/// whole run. Every other field falls back to an empty string.
pub async fn extract_listing<S: ListingScope>(listing: &S) -> Result<ListingRecord, ScrapeError> {
    let title = listing.inner_text(selectors::TITLE).await?;
    let location = listing.inner_text(selectors::LOCATION).await?;
    let chips = DetailChips::new(listing.all_inner_texts(selectors::DETAIL_CHIPS).await?);
    let employer = listing.inner_text(selectors::EMPLOYER).await?;
    let description = listing.all_inner_texts(selectors::DESCRIPTION).await?;

    let url = listing
        .all_attributes(selectors::URL_ANCHORS, "href")
        .await?
        .into_iter()
        .flatten()
        .next();

    let mut highlights = vec![];
    for block in listing.locate_all(selectors::HIGHLIGHT_BLOCKS).await? {
        highlights.extend(block.all_inner_texts(selectors::HIGHLIGHT_BULLETS).await?);
    }

    Ok(ListingRecord {
        title: clean_one(&title),
        location: clean_one(&location),
        post_date: chips.post_age().map(post_date).unwrap_or_default(),
        salary: clean_one(&attach_currency_symbol(chips.salary().unwrap_or(""))),
        employer: clean_one(&employer),
        job_description: clean_many(&description),
        job_highlights: clean_many(&highlights),
        url: url.map(|u| clean_one(&u)).unwrap_or_default(),
    })
}

fn post_date(phrase: &str) -> String {
    let phrase = clean_one(phrase);
    if !is_relative_time_phrase(&phrase) {
        log::debug!("Skipping post date, not a relative time: `{}`", phrase);
        return String::new();
    }

    match relative_time_to_date(&phrase) {
        Ok(Some(date)) => format_post_date(date),
        Ok(None) => String::new(),
        Err(e) => {
            log::debug!("Could not parse post date: {:?}", e);
            String::new()
        }
    }
}
