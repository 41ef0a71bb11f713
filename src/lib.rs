pub mod app_state;
pub mod config;
pub mod curation;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod middleware;
pub mod router;
pub mod summarizer;
pub mod telemetry;
