use actix_web::{get, web, HttpResponse};
use uuid::Uuid;

use crate::{error::ScrapeError, routes::jobs_route::JobsTemplate, services::JobScraper};

/// Shows the listings of a past run, re-extracted from its saved page source.
#[get("/replay/{run_id}")]
pub async fn replay(path: web::Path<String>, scraper: web::Data<JobScraper>) -> HttpResponse {
    let run_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(run_id) => run_id,
        Err(e) => return HttpResponse::BadRequest().body(format!("Invalid run id: {}", e)),
    };

    match scraper.replay(run_id).await {
        Ok(records) => JobsTemplate {
            positions: String::new(),
            location: String::new(),
            notice: Some(format!("Replayed run {}: {} listings", run_id, records.len())),
            jobs: records,
        }
        .into_response(),
        Err(ScrapeError::SnapshotsDisabled) => {
            HttpResponse::NotFound().body("Page snapshots are disabled")
        }
        Err(ScrapeError::Snapshot(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            HttpResponse::NotFound().body(format!("No snapshot saved for run {}", run_id))
        }
        Err(e) => HttpResponse::InternalServerError().body(format!("Got error: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};

    use crate::{
        configuration::{Browser, ScraperSettings, WebDriverSettings},
        domain::DEFAULT_SEARCH_ENDPOINT,
    };

    use super::*;

    const SAVED_PAGE: &str = r#"
        <html><body>
        <div role="tree">
            <div class="gws-plugins-horizon-jobs__tl-lif">Rust Developer</div>
        </div>
        <div id="gws-plugins-horizon-jobs__job_details_page">
            <h2 class="KLsYvd">Rust Developer</h2>
            <div class="nJlQNd">Ferris Inc</div>
            <div class="sMzDkb">Berlin</div>
        </div>
        </body></html>
    "#;

    fn job_scraper(snapshot_dir: Option<String>) -> JobScraper {
        JobScraper::new(
            WebDriverSettings {
                server_url: "http://localhost:4444".to_string(),
                browser: Browser::Firefox,
                headless: true,
            },
            ScraperSettings {
                search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
                max_scroll: 3,
                scroll_step_pixels: 5000,
                scroll_settle_millis: 0,
                render_settle_millis: 0,
                listing_wait_millis: 0,
                snapshot_dir,
            },
        )
    }

    #[actix_web::test]
    async fn replays_saved_run() {
        let dir = std::env::temp_dir().join(format!("jobscout-{}", Uuid::new_v4()));
        let run_id = Uuid::new_v4();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.html", run_id)), SAVED_PAGE).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(job_scraper(Some(
                    dir.to_string_lossy().to_string(),
                ))))
                .service(replay),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/replay/{}", run_id))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("<td>Rust Developer</td>"));
        assert!(body.contains(&format!("Replayed run {}: 1 listings", run_id)));

        let req = test::TestRequest::get()
            .uri(&format!("/replay/{}", Uuid::new_v4()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/replay/latest").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[actix_web::test]
    async fn disabled_snapshots_are_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(job_scraper(None)))
                .service(replay),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/replay/{}", Uuid::new_v4()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
