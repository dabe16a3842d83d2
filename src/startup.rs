use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use tokio::sync::Mutex;

use crate::{
    configuration::Settings,
    domain::ListingCollection,
    routes::{default_route, jobs_route, replay_route},
    services::JobScraper,
};

pub fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let job_scraper = web::Data::new(JobScraper::new(settings.webdriver, settings.scraper));
    let collection = web::Data::new(Mutex::new(ListingCollection::default()));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(default_route::default)
            .service(jobs_route::jobs)
            .service(replay_route::replay)
            .service(web::scope("/api").service(jobs_route::jobs_json))
            .app_data(job_scraper.clone())
            .app_data(collection.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
