use serde::{Deserialize, Serialize};

pub const EBIRD_API_BASE: &str = "https://api.ebird.org/v2";

/// URL builder for the eBird 2.0 endpoints we use
///
/// The API key travels in the query string, so it is part of every URL and
/// therefore part of every cache key.
#[derive(Debug, Clone)]
pub struct EbirdEndpoints {
    base_url: String,
    key: String,
}

impl EbirdEndpoints {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_base_url(key, EBIRD_API_BASE)
    }

    /// For pointing at a mirror or a local test server
    pub fn with_base_url(key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key: key.into(),
        }
    }

    /// "Get Region Info" listing of the counties (subnational2) of a US state
    pub fn region_list_url(&self, state_code: &str) -> String {
        format!(
            "{}/ref/region/list/subnational2/US-{}?key={}",
            self.base_url,
            urlencoding::encode(state_code),
            urlencoding::encode(&self.key)
        )
    }

    /// Recent observations within a region such as `US-CA-001`
    pub fn recent_observations_url(&self, region_code: &str) -> String {
        format!(
            "{}/data/obs/{}/recent?key={}",
            self.base_url,
            urlencoding::encode(region_code),
            urlencoding::encode(&self.key)
        )
    }
}

/// One entry of the region listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub code: String,
    pub name: String,
}

/// A single reported sighting from the recent observations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub species_code: String,
    pub com_name: String,
    pub sci_name: String,
    #[serde(default)]
    pub loc_name: Option<String>,
    #[serde(default)]
    pub obs_dt: Option<String>,
    /// Kept as the JSON number so the stored text matches what the API sent
    pub lat: serde_json::Number,
    pub lng: serde_json::Number,
    #[serde(default)]
    pub location_private: bool,
}

pub fn parse_regions(body: &str) -> crate::Result<Vec<RegionEntry>> {
    Ok(serde_json::from_str(body)?)
}

pub fn parse_observations(body: &str) -> crate::Result<Vec<Observation>> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_list_url() {
        let endpoints = EbirdEndpoints::new("abc123");
        assert_eq!(
            endpoints.region_list_url("CA"),
            "https://api.ebird.org/v2/ref/region/list/subnational2/US-CA?key=abc123"
        );
    }

    #[test]
    fn test_recent_observations_url_with_custom_base() {
        let endpoints = EbirdEndpoints::with_base_url("k", "http://localhost:8080/v2/");
        assert_eq!(
            endpoints.recent_observations_url("US-CA-001"),
            "http://localhost:8080/v2/data/obs/US-CA-001/recent?key=k"
        );
    }

    #[test]
    fn test_parse_regions() {
        let body = r#"[{"code":"US-CA-001","name":"Alameda"},{"code":"US-CA-085","name":"Santa Clara"}]"#;
        let regions = parse_regions(body).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].code, "US-CA-085");
        assert_eq!(regions[1].name, "Santa Clara");
    }

    #[test]
    fn test_parse_observations() {
        let body = r#"[{
            "speciesCode": "annhum",
            "comName": "Anna's Hummingbird",
            "sciName": "Calypte anna",
            "locId": "L123",
            "locName": "Lake Merritt",
            "obsDt": "2024-04-02 08:15",
            "howMany": 2,
            "lat": 37.8,
            "lng": -122.25,
            "obsValid": true,
            "obsReviewed": false,
            "locationPrivate": true
        }]"#;

        let observations = parse_observations(body).unwrap();
        assert_eq!(observations.len(), 1);
        let obs = &observations[0];
        assert_eq!(obs.species_code, "annhum");
        assert_eq!(obs.loc_name.as_deref(), Some("Lake Merritt"));
        assert_eq!(obs.lat.to_string(), "37.8");
        assert_eq!(obs.lng.to_string(), "-122.25");
        assert!(obs.location_private);
    }

    #[test]
    fn test_parse_observations_missing_optional_fields() {
        let body = r#"[{"speciesCode":"x","comName":"X","sciName":"Xus","lat":1.5,"lng":2.5}]"#;
        let obs = &parse_observations(body).unwrap()[0];
        assert!(obs.loc_name.is_none());
        assert!(obs.obs_dt.is_none());
        assert!(!obs.location_private);
    }

    #[test]
    fn test_parse_error_page_fails() {
        assert!(parse_regions("<html>Forbidden</html>").is_err());
    }
}
