// The interactive loop: state -> county -> sighting -> details
use anyhow::Result;
use birdscout_api::Fetcher;
use birdscout_cache::RequestCache;
use birdscout_charts::open_in_viewer;
use birdscout_core::config::OutputConfig;
use birdscout_core::details::{reverse_geocode, species_page};
use birdscout_core::visualize::{write_county_charts, write_detail_table};
use birdscout_core::{
    list_counties, list_sightings, populate_counties, populate_sightings, Endpoints, StateChoice,
    StateTable,
};
use birdscout_store::ObservationStore;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::warn;

use crate::prompt::Prompter;

const WELCOME: &str = "\nWelcome! To get started searching for bird sightings info, enter the name of the state you would like to query, or \"exit\": ";
const SEARCH_AGAIN: &str = "To search for more bird sightings, enter the name of the state you would like to query, or enter \"exit\":";
const COUNTY_PROMPT: &str = "\nSelect the integer of the county you would like to query, or \"exit\": ";
const SIGHTING_PROMPT: &str = "\nSelect the integer of the bird sighting you would like to learn more about, or \"exit\": ";
const NO_SIGHTINGS: &str = "\nSorry! This area has no reported sightings.";
const SCRAPE_FAILED: &str = "\nSorry! This specie's eBird page follows an unstandard format and we could not retrieve details.";

/// Whether the user asked to leave while answering a state's prompts
enum Flow {
    Continue,
    Exit,
}

pub struct Session<F> {
    pub store: ObservationStore,
    pub cache: RequestCache,
    pub fetcher: F,
    pub endpoints: Endpoints,
    pub states: StateTable,
    pub output: OutputConfig,
}

impl<F: Fetcher> Session<F> {
    /// Run until the user types `exit` or input ends
    pub async fn run<R: BufRead, W: Write>(&mut self, prompter: &mut Prompter<R, W>) -> Result<()> {
        let mut message = WELCOME;

        loop {
            let (state_name, state_code) = match prompter.ask_state(message, &self.states)? {
                StateChoice::Found { name, code } => (name, code),
                StateChoice::Exit | StateChoice::Unknown => return Ok(()),
            };
            message = SEARCH_AGAIN;

            if let Flow::Exit = self.query_state(prompter, &state_name, &state_code).await? {
                return Ok(());
            }
        }
    }

    async fn query_state<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        state_name: &str,
        state_code: &str,
    ) -> Result<Flow> {
        populate_counties(
            &self.store,
            &mut self.cache,
            &self.fetcher,
            &self.endpoints.ebird,
            state_code,
        )
        .await?;

        let county_max = list_counties(&self.store, prompter.output(), state_code, state_name)?;
        if county_max == 0 {
            writeln!(prompter.output(), "\nSorry! No counties were found for {}.", state_name)?;
            return Ok(Flow::Continue);
        }

        let Some(county_choice) =
            prompter.ask_selection(COUNTY_PROMPT, county_max, "county", "query")?
        else {
            return Ok(Flow::Exit);
        };

        let outcome = populate_sightings(
            &self.store,
            &self.fetcher,
            &self.endpoints.ebird,
            county_choice,
            state_code,
        )
        .await?;
        let county_name = outcome.county_name;

        let sighting_max = list_sightings(&self.store, prompter.output(), &county_name)?;
        if sighting_max == 0 {
            writeln!(prompter.output(), "{}", NO_SIGHTINGS)?;
            return Ok(Flow::Continue);
        }

        let charts = write_county_charts(&self.store, &county_name, &self.output.directory)?;
        for path in charts.paths() {
            self.show_file(path);
        }
        self.announce(prompter.output())?;

        let Some(sighting_choice) = prompter.ask_selection(
            SIGHTING_PROMPT,
            sighting_max,
            "bird sighting",
            "learn more about",
        )?
        else {
            return Ok(Flow::Exit);
        };

        self.show_details(prompter.output(), &county_name, sighting_choice)
            .await?;
        Ok(Flow::Continue)
    }

    async fn show_details<W: Write>(
        &mut self,
        out: &mut W,
        county_name: &str,
        sighting_choice: u32,
    ) -> Result<()> {
        let address = reverse_geocode(
            &self.store,
            &mut self.cache,
            &self.fetcher,
            &self.endpoints.locationiq,
            sighting_choice,
            county_name,
        )
        .await?;

        let page = match species_page(
            &self.store,
            &mut self.cache,
            &self.fetcher,
            &self.endpoints.birdsna,
            sighting_choice,
            county_name,
        )
        .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!("Species page unavailable: {}", e);
                writeln!(out, "{}", SCRAPE_FAILED)?;
                return Ok(());
            }
        };

        let title = self
            .store
            .sightings_for_county(county_name)?
            .into_iter()
            .find(|s| s.county_index == sighting_choice)
            .map(|s| s.common_name)
            .unwrap_or_else(|| county_name.to_string());

        if self.output.open_in_browser {
            self.show(&page.image_url);
        }
        let table = write_detail_table(&self.output.directory, &title, &page, &address)?;
        self.show_file(&table);
        self.announce(out)?;
        Ok(())
    }

    fn announce<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.output.open_in_browser {
            writeln!(out, "\nRelevant items have been opened in your default browser.\n-----")?;
        } else {
            writeln!(
                out,
                "\nRelevant items have been written to {}.\n-----",
                self.output.directory.display()
            )?;
        }
        Ok(())
    }

    fn show_file(&self, path: &Path) {
        if self.output.open_in_browser {
            self.show(&path.display().to_string());
        }
    }

    // A viewer that fails to start is not worth ending the session over
    fn show(&self, target: &str) {
        if let Err(e) = open_in_viewer(target) {
            warn!("{}", e);
        }
    }
}
