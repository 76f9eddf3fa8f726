pub mod config;
pub mod logging;
pub mod postgres_repo;
pub mod reqwest_http;
