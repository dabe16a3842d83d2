pub mod default_route;
pub mod jobs_route;
pub mod replay_route;
