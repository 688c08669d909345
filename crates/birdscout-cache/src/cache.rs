use birdscout_api::{ApiError, Fetcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Request failed: {0}")]
    Fetch(#[from] ApiError),

    #[error("Failed to write cache file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize cache: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;

/// URL → raw response body, persisted as one flat JSON object.
///
/// No expiry and no invalidation: once a URL is in here it is served from
/// here for as long as the file exists. Every miss rewrites the whole file.
#[derive(Debug)]
pub struct RequestCache {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl RequestCache {
    /// Load the cache file, falling back to an empty cache if it is missing,
    /// unreadable or not a JSON object of strings
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!("Ignoring malformed cache file {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) => {
                debug!("No usable cache file at {}: {}", path.display(), e);
                HashMap::new()
            }
        };

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a body and persist the whole mapping
    pub fn insert(&mut self, url: &str, body: String) -> Result<()> {
        self.entries.insert(url.to_string(), body);
        self.save()
    }

    /// Serve `url` from the cache, or GET it once and remember the body.
    ///
    /// Whatever body comes back is cached, error pages included.
    pub async fn fetch<F>(&mut self, url: &str, fetcher: &F) -> Result<String>
    where
        F: Fetcher + ?Sized,
    {
        if let Some(body) = self.get(url) {
            info!("Using cache");
            return Ok(body.to_string());
        }

        info!("Fetching");
        let body = fetcher.get_text(url).await?;
        self.insert(url, body.clone())?;

        Ok(body)
    }

    fn save(&self) -> Result<()> {
        let contents = serde_json::to_string(&self.entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}
