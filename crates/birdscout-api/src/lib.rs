// Remote endpoints: eBird, LocationIQ and the birdsna.org species pages
pub mod birdsna;
pub mod ebird;
pub mod http;
pub mod locationiq;

// Re-export common types
pub use birdsna::{BirdsnaEndpoints, ScrapeError, SpeciesPage};
pub use ebird::{EbirdEndpoints, Observation, RegionEntry};
pub use http::{ApiError, Fetcher, HttpClient, Result};
pub use locationiq::{LocationIqEndpoints, ReverseGeocode};
