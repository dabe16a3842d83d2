use std::time::Instant;

use actix_web::{get, web, HttpResponse};
use askama::Template;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    domain::{compose_query, ListingCollection, ListingRecord},
    error::ScrapeError,
    services::JobScraper,
};

#[derive(Template)]
#[template(path = "jobs.html")]
pub struct JobsTemplate {
    pub positions: String,
    pub location: String,
    pub notice: Option<String>,
    pub jobs: Vec<ListingRecord>,
}

impl JobsTemplate {
    pub fn into_response(self) -> HttpResponse {
        match self.render() {
            Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
            Err(e) => {
                log::error!("Failed to render jobs template: {:?}", e);
                HttpResponse::InternalServerError().body(format!("Got error: {}", e))
            }
        }
    }
}

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    positions: String,
    #[serde(default)]
    location: String,
}

/// Resets the shared collection, runs the search and fills it again.
///
/// The lock is held for the whole run so searches never overlap.
async fn search(
    form: &SearchForm,
    scraper: &JobScraper,
    collection: &Mutex<ListingCollection>,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    let mut collection = collection.lock().await;
    let query = compose_query(&form.positions, &form.location);
    let run_id = collection.reset(&query);

    let start_time = Instant::now();
    let records = scraper.search(run_id, &query).await?;
    collection.extend(records);

    let minutes = start_time.elapsed().as_secs_f64() / 60.0;
    log::debug!("[{}] Time elapsed: {:.1} minutes", run_id, minutes);

    Ok(collection.records().to_vec())
}

#[get("/jobs")]
pub async fn jobs(
    form: web::Query<SearchForm>,
    scraper: web::Data<JobScraper>,
    collection: web::Data<Mutex<ListingCollection>>,
) -> HttpResponse {
    let form = form.into_inner();

    if form.positions.trim().is_empty() {
        return JobsTemplate {
            positions: form.positions,
            location: form.location,
            notice: Some("Enter at least one position title".to_string()),
            jobs: vec![],
        }
        .into_response();
    }

    match search(&form, &scraper, &collection).await {
        Ok(records) => results_page(form, records).into_response(),
        Err(e) => HttpResponse::InternalServerError().body(format!("Got error: {}", e)),
    }
}

fn results_page(form: SearchForm, records: Vec<ListingRecord>) -> JobsTemplate {
    JobsTemplate {
        notice: records
            .is_empty()
            .then(|| "No jobs found for this search".to_string()),
        positions: form.positions,
        location: form.location,
        jobs: records,
    }
}

#[get("/jobs")]
pub async fn jobs_json(
    form: web::Query<SearchForm>,
    scraper: web::Data<JobScraper>,
    collection: web::Data<Mutex<ListingCollection>>,
) -> HttpResponse {
    if form.positions.trim().is_empty() {
        return HttpResponse::BadRequest().body("positions must not be empty");
    }

    match search(&form, &scraper, &collection).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => HttpResponse::InternalServerError().body(format!("Got error: {}", e)),
    }
}
