use serde::{Deserialize, Serialize};

pub const LOCATIONIQ_API_BASE: &str = "https://us1.locationiq.com/v1";

#[derive(Debug, Clone)]
pub struct LocationIqEndpoints {
    base_url: String,
    key: String,
}

impl LocationIqEndpoints {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_base_url(key, LOCATIONIQ_API_BASE)
    }

    pub fn with_base_url(key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key: key.into(),
        }
    }

    /// Reverse geocoding lookup; lat/lon are passed through as stored
    pub fn reverse_url(&self, lat: &str, lon: &str) -> String {
        format!(
            "{}/reverse.php?key={}&lat={}&lon={}&format=json",
            self.base_url,
            urlencoding::encode(&self.key),
            urlencoding::encode(lat),
            urlencoding::encode(lon)
        )
    }
}

/// The only part of the reverse geocoding response we care about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseGeocode {
    pub display_name: String,
}

pub fn parse_reverse(body: &str) -> crate::Result<ReverseGeocode> {
    Ok(serde_json::from_str(body)?)
}
