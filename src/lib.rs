pub mod backend;
pub mod cache;
pub mod config;
pub mod http;
pub mod metrics;
pub mod queue;
pub mod refresher;
