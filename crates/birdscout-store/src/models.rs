use serde::{Deserialize, Serialize};

/// A county of the selected state, numbered in the order the API listed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct County {
    /// 1-based position within the state, shown to the user as the selector
    pub state_count: u32,
    /// eBird region code, e.g. `US-CA-001`
    pub location_code: String,
    pub name: String,
}

/// One recent observation, owned by the county it was fetched for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sighting {
    pub county_name: String,
    /// 1-based, dense within `county_name`
    pub county_index: u32,
    pub species_code: String,
    pub common_name: String,
    pub scientific_name: String,
    pub location_name: Option<String>,
    pub observation_date: Option<String>,
    pub lat: String,
    pub long: String,
    pub private_location: bool,
}

/// Result of inserting a county row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// (location code, name) pair was already present; expected and ignorable
    Duplicate,
}

/// Sightings grouped by location name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location_name: Option<String>,
    pub lat: String,
    pub long: String,
    pub private_location: bool,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyCounts {
    pub private: u32,
    pub public: u32,
}

impl PrivacyCounts {
    pub fn total(&self) -> u32 {
        self.private + self.public
    }
}
