// Charts for a county and the detail table for one sighting
use birdscout_api::SpeciesPage;
use birdscout_charts::{write_document, Bar, BarChart, DetailTable, PieChart, ScatterChart, Slice};
use birdscout_store::ObservationStore;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::listing::date_histogram;
use crate::Result;

pub const LOCATION_CHART_FILE: &str = "locationchart.html";
pub const LINE_GRAPH_FILE: &str = "linegraph.html";
pub const PRIVACY_CHART_FILE: &str = "privatepublicchart.html";
pub const DETAIL_TABLE_FILE: &str = "taxonomychart.html";

const TOP_LOCATIONS: u32 = 5;

/// Where the three county charts were written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyCharts {
    pub locations: PathBuf,
    pub timeline: PathBuf,
    pub privacy: PathBuf,
}

impl CountyCharts {
    pub fn paths(&self) -> [&Path; 3] {
        [&self.locations, &self.timeline, &self.privacy]
    }
}

fn county_title(county_name: &str) -> String {
    format!("Recent Bird Sightings in {} County", county_name)
}

/// Busiest five locations of the county
pub fn location_chart(store: &ObservationStore, county_name: &str) -> Result<BarChart> {
    let bars = store
        .top_locations(county_name, TOP_LOCATIONS)?
        .into_iter()
        .map(|location| Bar {
            label: format!(
                "{}  |  lat: {} / long: {}    ",
                location.location_name.as_deref().unwrap_or("Unknown location"),
                location.lat,
                location.long
            ),
            value: location.count,
        })
        .collect();

    Ok(BarChart {
        title: county_title(county_name),
        bars,
    })
}

/// Sightings per day
pub fn timeline_chart(store: &ObservationStore, county_name: &str) -> Result<ScatterChart> {
    let dates = store.observation_dates(county_name)?;

    Ok(ScatterChart {
        title: county_title(county_name),
        points: date_histogram(&dates),
    })
}

pub fn privacy_chart(store: &ObservationStore, county_name: &str) -> Result<PieChart> {
    let counts = store.privacy_counts(county_name)?;

    Ok(PieChart {
        title: format!(
            "Proportions of Sightings in Public and Private Property in {}",
            county_name
        ),
        slices: vec![
            Slice {
                label: "Private Property".to_string(),
                value: counts.private,
            },
            Slice {
                label: "Public Property".to_string(),
                value: counts.public,
            },
        ],
    })
}

pub fn detail_table(title: &str, page: &SpeciesPage, address: &str) -> DetailTable {
    DetailTable::new(
        title,
        vec![
            ("Order".to_string(), page.order().to_string()),
            ("Family".to_string(), page.family().to_string()),
            ("Genus".to_string(), page.genus().to_string()),
            ("Status".to_string(), page.status.clone()),
            ("Address Sighted".to_string(), address.to_string()),
        ],
    )
}

/// Render and write the three county charts into `dir`
pub fn write_county_charts(
    store: &ObservationStore,
    county_name: &str,
    dir: &Path,
) -> Result<CountyCharts> {
    let locations = write_document(
        dir,
        LOCATION_CHART_FILE,
        &location_chart(store, county_name)?.to_html(),
    )?;
    let timeline = write_document(
        dir,
        LINE_GRAPH_FILE,
        &timeline_chart(store, county_name)?.to_html(),
    )?;
    let privacy = write_document(
        dir,
        PRIVACY_CHART_FILE,
        &privacy_chart(store, county_name)?.to_html(),
    )?;

    info!("Wrote charts for {} to {}", county_name, dir.display());

    Ok(CountyCharts {
        locations,
        timeline,
        privacy,
    })
}

pub fn write_detail_table(
    dir: &Path,
    title: &str,
    page: &SpeciesPage,
    address: &str,
) -> Result<PathBuf> {
    let html = detail_table(title, page, address).to_html();
    Ok(write_document(dir, DETAIL_TABLE_FILE, &html)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use birdscout_store::Sighting;
    use tempfile::TempDir;

    fn sighting(index: u32, location: &str, date: Option<&str>, private: bool) -> Sighting {
        Sighting {
            county_name: "Alameda".to_string(),
            county_index: index,
            species_code: format!("sp{}", index),
            common_name: format!("Bird {}", index),
            scientific_name: format!("Avis {}", index),
            location_name: Some(location.to_string()),
            observation_date: date.map(str::to_string),
            lat: "37.8".to_string(),
            long: "-122.25".to_string(),
            private_location: private,
        }
    }

    fn seeded_store() -> ObservationStore {
        let store = ObservationStore::open_in_memory().unwrap();
        store.reset_schema().unwrap();
        let rows = [
            sighting(1, "Lake Merritt", Some("2024-04-01 08:00"), false),
            sighting(2, "Lake Merritt", Some("2024-04-01 09:30"), false),
            sighting(3, "Backyard", Some("2024-04-02 07:00"), true),
            sighting(4, "Tilden Park", None, false),
        ];
        for row in &rows {
            store.insert_sighting(row).unwrap();
        }
        store
    }

    #[test]
    fn test_location_chart_labels() {
        let store = seeded_store();
        let chart = location_chart(&store, "Alameda").unwrap();

        assert_eq!(chart.title, "Recent Bird Sightings in Alameda County");
        assert_eq!(chart.bars.len(), 3);
        assert_eq!(
            chart.bars[0].label,
            "Lake Merritt  |  lat: 37.8 / long: -122.25    "
        );
        assert_eq!(chart.bars[0].value, 2);
    }

    #[test]
    fn test_timeline_skips_undated() {
        let store = seeded_store();
        let chart = timeline_chart(&store, "Alameda").unwrap();

        let counts: Vec<u32> = chart.points.iter().map(|(_, n)| *n).collect();
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn test_privacy_chart_counts() {
        let store = seeded_store();
        let chart = privacy_chart(&store, "Alameda").unwrap();

        assert_eq!(chart.slices[0].label, "Private Property");
        assert_eq!(chart.slices[0].value, 1);
        assert_eq!(chart.slices[1].value, 3);
    }

    #[test]
    fn test_write_county_charts() {
        let store = seeded_store();
        let dir = TempDir::new().unwrap();

        let charts = write_county_charts(&store, "Alameda", dir.path()).unwrap();
        assert_eq!(charts.locations, dir.path().join(LOCATION_CHART_FILE));
        for path in charts.paths() {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_detail_table_rows() {
        let page = SpeciesPage {
            image_url: "https://example.org/annhum.jpg".to_string(),
            status: "Low Concern".to_string(),
            taxonomy: vec!["Apodiformes".to_string(), "Trochilidae".to_string()],
        };

        let table = detail_table("Anna's Hummingbird", &page, "Oakland, CA");
        let labels: Vec<&str> = table.rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Order", "Family", "Genus", "Status", "Address Sighted"]);
        assert_eq!(table.rows[2].1, "");
        assert_eq!(table.rows[4].1, "Oakland, CA");
    }
}
