// Test doubles shared by the module tests
use async_trait::async_trait;
use birdscout_api::{ApiError, Fetcher};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves canned bodies by URL and counts every request it sees
#[derive(Default)]
pub struct FakeRemote {
    responses: HashMap<String, String>,
    calls: AtomicUsize,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), body.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for FakeRemote {
    async fn get_text(&self, url: &str) -> birdscout_api::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::ClientBuild(format!("no canned response for {}", url)))
    }
}

/// Recent-observations JSON with one entry per (location, date, private)
pub fn observations_body(rows: &[(&str, &str, bool)]) -> String {
    let entries: Vec<serde_json::Value> = rows
        .iter()
        .enumerate()
        .map(|(i, (location, date, private))| {
            serde_json::json!({
                "speciesCode": format!("sp{}", i + 1),
                "comName": format!("Bird {}", i + 1),
                "sciName": format!("Avis {}", i + 1),
                "locName": location,
                "obsDt": date,
                "lat": 37.8,
                "lng": -122.25,
                "locationPrivate": private,
            })
        })
        .collect();

    serde_json::Value::Array(entries).to_string()
}
