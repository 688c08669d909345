// SQLite observation store: counties and the sightings reported in them
// Rebuilt from scratch on every run, so there are no migrations

pub mod models;
pub mod schema;
pub mod store;

pub use models::{County, InsertOutcome, LocationCount, PrivacyCounts, Sighting};
pub use store::{ObservationStore, StoreError};
