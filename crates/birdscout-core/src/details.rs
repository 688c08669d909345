// Extra detail for one picked sighting: where it was and what the bird is
use birdscout_api::{locationiq, BirdsnaEndpoints, Fetcher, LocationIqEndpoints, SpeciesPage};
use birdscout_cache::RequestCache;
use birdscout_store::ObservationStore;

use crate::{Error, Result};

/// Street address of the sighting listed as `[county_index]`
pub async fn reverse_geocode<F>(
    store: &ObservationStore,
    cache: &mut RequestCache,
    fetcher: &F,
    endpoints: &LocationIqEndpoints,
    county_index: u32,
    county_name: &str,
) -> Result<String>
where
    F: Fetcher + ?Sized,
{
    let (lat, long) = store
        .lookup_sighting_location(county_index, county_name)?
        .ok_or_else(|| sighting_not_found(county_index, county_name))?;

    let url = endpoints.reverse_url(&lat, &long);
    let body = cache.fetch(&url, fetcher).await?;
    Ok(locationiq::parse_reverse(&body)?.display_name)
}

/// Species profile (picture, status, taxonomy) for the sighting listed as
/// `[county_index]`.
///
/// A page whose layout doesn't match comes back as [`Error::ScrapeError`].
pub async fn species_page<F>(
    store: &ObservationStore,
    cache: &mut RequestCache,
    fetcher: &F,
    endpoints: &BirdsnaEndpoints,
    county_index: u32,
    county_name: &str,
) -> Result<SpeciesPage>
where
    F: Fetcher + ?Sized,
{
    let species_code = store
        .lookup_species_code(county_index, county_name)?
        .ok_or_else(|| sighting_not_found(county_index, county_name))?;

    let url = endpoints.species_url(&species_code);
    let html = cache.fetch(&url, fetcher).await?;
    Ok(SpeciesPage::parse(&html)?)
}

fn sighting_not_found(index: u32, county_name: &str) -> Error {
    Error::SightingNotFound {
        index,
        county: county_name.to_string(),
    }
}
