mod client;
mod config;
mod error;

pub use client::HttpTrackerService;
pub use config::HttpServiceConfig;
pub use error::{HttpResult, HttpServiceError};
