// Remote data fetchers: pull counties and recent sightings into the store
use birdscout_api::{ebird, EbirdEndpoints, Fetcher};
use birdscout_cache::RequestCache;
use birdscout_store::{County, InsertOutcome, ObservationStore, Sighting};
use tracing::{debug, info};

use crate::{Error, Result};

/// What happened to each region entry of a county listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
    pub inserted: usize,
    /// Already-present (code, name) pairs, skipped without failing the batch
    pub duplicates: usize,
}

/// Fill the counties table for a state from the eBird region listing.
///
/// Counties are numbered 1..N in the order the API returns them. The listing
/// goes through the request cache.
pub async fn populate_counties<F>(
    store: &ObservationStore,
    cache: &mut RequestCache,
    fetcher: &F,
    endpoints: &EbirdEndpoints,
    state_code: &str,
) -> Result<PopulateReport>
where
    F: Fetcher + ?Sized,
{
    let url = endpoints.region_list_url(state_code);
    let body = cache.fetch(&url, fetcher).await?;
    let regions = ebird::parse_regions(&body)?;

    let mut report = PopulateReport::default();
    for (position, region) in regions.into_iter().enumerate() {
        let county = County {
            state_count: position as u32 + 1,
            location_code: region.code,
            name: region.name,
        };

        match store.insert_county(&county)? {
            InsertOutcome::Inserted => report.inserted += 1,
            InsertOutcome::Duplicate => report.duplicates += 1,
        }
    }

    info!(
        "Stored {} counties for {} ({} duplicates skipped)",
        report.inserted, state_code, report.duplicates
    );
    Ok(report)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SightingsOutcome {
    pub county_name: String,
    /// Zero when the county already had sightings stored
    pub inserted: usize,
}

/// Fill the sightings table for the county listed as `[county_choice]`.
///
/// The recent-observations request always goes to the network and is never
/// read from or written to the request cache: observations are the one
/// time-sensitive response. If the county already has sightings stored, the
/// existing rows are kept as current and nothing is inserted.
pub async fn populate_sightings<F>(
    store: &ObservationStore,
    fetcher: &F,
    endpoints: &EbirdEndpoints,
    county_choice: u32,
    state_code: &str,
) -> Result<SightingsOutcome>
where
    F: Fetcher + ?Sized,
{
    let county = store
        .find_county(county_choice, state_code)?
        .ok_or_else(|| Error::CountyNotFound {
            index: county_choice,
            state: state_code.to_string(),
        })?;

    info!("Fetching recent sightings for {}", county.name);
    let url = endpoints.recent_observations_url(&county.location_code);
    let body = fetcher.get_text(&url).await?;
    let observations = ebird::parse_observations(&body)?;

    if store.has_sightings(&county.name)? {
        debug!("{} already has sightings stored, keeping them", county.name);
        return Ok(SightingsOutcome {
            county_name: county.name,
            inserted: 0,
        });
    }

    let mut inserted = 0;
    for (position, obs) in observations.into_iter().enumerate() {
        let sighting = Sighting {
            county_name: county.name.clone(),
            county_index: position as u32 + 1,
            species_code: obs.species_code,
            common_name: obs.com_name,
            scientific_name: obs.sci_name,
            location_name: obs.loc_name,
            observation_date: obs.obs_dt,
            lat: obs.lat.to_string(),
            long: obs.lng.to_string(),
            private_location: obs.location_private,
        };
        store.insert_sighting(&sighting)?;
        inserted += 1;
    }

    info!("Stored {} sightings for {}", inserted, county.name);
    Ok(SightingsOutcome {
        county_name: county.name,
        inserted,
    })
}
