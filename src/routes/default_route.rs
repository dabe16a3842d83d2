use actix_web::{get, web, HttpResponse};
use tokio::sync::Mutex;

use crate::{domain::ListingCollection, routes::jobs_route::JobsTemplate};

#[get("/")]
pub async fn default(collection: web::Data<Mutex<ListingCollection>>) -> HttpResponse {
    let template = match collection.try_lock() {
        Ok(collection) => JobsTemplate {
            positions: String::new(),
            location: String::new(),
            notice: (!collection.query().is_empty())
                .then(|| format!("Last search: {}", collection.query())),
            jobs: collection.records().to_vec(),
        },
        Err(_) => JobsTemplate {
            positions: String::new(),
            location: String::new(),
            notice: Some("A search is running, results will show when it finishes".to_string()),
            jobs: vec![],
        },
    };

    template.into_response()
}
