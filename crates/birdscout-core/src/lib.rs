// Core business logic: populating the store, listing it, validating picks
pub mod config;
pub mod details;
pub mod error;
pub mod listing;
pub mod populate;
pub mod selection;
pub mod states;
#[cfg(test)]
mod testing;
pub mod visualize;

pub use config::{Config, Endpoints};
pub use error::Error;
pub use listing::{date_histogram, list_counties, list_sightings};
pub use populate::{populate_counties, populate_sightings, PopulateReport, SightingsOutcome};
pub use selection::{resolve_state, validate_selection, Selection, StateChoice};
pub use states::StateTable;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
