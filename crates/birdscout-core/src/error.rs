use birdscout_api::{ApiError, ScrapeError};
use birdscout_cache::CacheError;
use birdscout_store::StoreError;
use thiserror::Error;

/// All the ways a BirdScout session can go wrong
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(#[from] ApiError),

    #[error("Cache operation failed: {0}")]
    CacheError(#[from] CacheError),

    #[error("Store operation failed: {0}")]
    StoreError(#[from] StoreError),

    #[error("Species page layout not recognized: {0}")]
    ScrapeError(#[from] ScrapeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Could not load state list: {0}")]
    StateTableError(String),

    #[error("No county [{index}] listed for {state}")]
    CountyNotFound { index: u32, state: String },

    #[error("No sighting [{index}] listed for {county}")]
    SightingNotFound { index: u32, county: String },

    #[error("Chart output failed: {0}")]
    ChartError(#[from] birdscout_charts::ChartError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
