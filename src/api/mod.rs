pub mod client;
pub mod models;

pub use client::{ApiError, InstaClient, MediaClient, Result};
pub use models::{ApiConfig, DownloadReport};
