// Numbered listings the user picks from, plus the date histogram for charts
use birdscout_store::ObservationStore;
use chrono::NaiveDate;
use std::io::Write;
use tracing::warn;

use crate::Result;

/// Print the counties of a state as `[n] name` lines.
///
/// Returns the highest number shown (0 when nothing is stored for the state),
/// which is the upper bound for the county prompt.
pub fn list_counties<W: Write>(
    store: &ObservationStore,
    out: &mut W,
    state_code: &str,
    state_label: &str,
) -> Result<u32> {
    let counties = store.counties_for_state(state_code)?;

    writeln!(out, "\nLIST OF COUNTIES IN {}", state_label.to_uppercase())?;
    for county in &counties {
        writeln!(out, "[{}] {}", county.state_count, county.name)?;
    }

    Ok(counties.iter().map(|c| c.state_count).max().unwrap_or(0))
}

/// Print the sightings of a county as `[i] Species: name | Date: date` lines.
///
/// Returns the highest index shown, 0 when the county has no sightings.
pub fn list_sightings<W: Write>(
    store: &ObservationStore,
    out: &mut W,
    county_name: &str,
) -> Result<u32> {
    let sightings = store.sightings_for_county(county_name)?;

    writeln!(out, "LIST OF BIRD SIGHTINGS IN {}", county_name.to_uppercase())?;
    for sighting in &sightings {
        writeln!(
            out,
            "[{}] Species: {} | Date: {}",
            sighting.county_index,
            sighting.common_name,
            sighting.observation_date.as_deref().unwrap_or("unknown")
        )?;
    }

    Ok(sightings.iter().map(|s| s.county_index).max().unwrap_or(0))
}

/// Count sightings per calendar day.
///
/// Timestamps look like `2024-04-01 08:15`; only the part before the first
/// space is used. Days come back in the order they are first seen, so sorted
/// input gives sorted output.
pub fn date_histogram(timestamps: &[String]) -> Vec<(NaiveDate, u32)> {
    let mut days: Vec<(NaiveDate, u32)> = Vec::new();

    for timestamp in timestamps {
        let day = timestamp.split_whitespace().next().unwrap_or("");
        let date = match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                warn!("Skipping unreadable observation date {:?}: {}", timestamp, e);
                continue;
            }
        };

        match days.iter_mut().find(|(seen, _)| *seen == date) {
            Some((_, count)) => *count += 1,
            None => days.push((date, 1)),
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use birdscout_store::{County, Sighting};

    fn store() -> ObservationStore {
        let store = ObservationStore::open_in_memory().unwrap();
        store.reset_schema().unwrap();
        store
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_counties() {
        let store = store();
        for (n, code, name) in [(1, "US-CA-001", "Alameda"), (2, "US-CA-085", "Santa Clara")] {
            store
                .insert_county(&County {
                    state_count: n,
                    location_code: code.to_string(),
                    name: name.to_string(),
                })
                .unwrap();
        }

        let mut buf = Vec::new();
        let max = list_counties(&store, &mut buf, "CA", "California").unwrap();

        assert_eq!(max, 2);
        assert_eq!(
            output(buf),
            "\nLIST OF COUNTIES IN CALIFORNIA\n[1] Alameda\n[2] Santa Clara\n"
        );
    }

    #[test]
    fn test_list_counties_empty_state() {
        let store = store();
        let mut buf = Vec::new();
        assert_eq!(list_counties(&store, &mut buf, "WY", "Wyoming").unwrap(), 0);
    }

    #[test]
    fn test_list_sightings() {
        let store = store();
        for index in 1..=2 {
            store
                .insert_sighting(&Sighting {
                    county_name: "Alameda".to_string(),
                    county_index: index,
                    species_code: "annhum".to_string(),
                    common_name: "Anna's Hummingbird".to_string(),
                    scientific_name: "Calypte anna".to_string(),
                    location_name: None,
                    observation_date: if index == 1 { Some("2024-04-01 08:00".to_string()) } else { None },
                    lat: "37.8".to_string(),
                    long: "-122.25".to_string(),
                    private_location: false,
                })
                .unwrap();
        }

        let mut buf = Vec::new();
        let max = list_sightings(&store, &mut buf, "Alameda").unwrap();

        assert_eq!(max, 2);
        let text = output(buf);
        assert!(text.starts_with("LIST OF BIRD SIGHTINGS IN ALAMEDA\n"));
        assert!(text.contains("[1] Species: Anna's Hummingbird | Date: 2024-04-01 08:00\n"));
        assert!(text.contains("[2] Species: Anna's Hummingbird | Date: unknown\n"));
    }

    #[test]
    fn test_list_sightings_none() {
        let store = store();
        let mut buf = Vec::new();
        assert_eq!(list_sightings(&store, &mut buf, "Alameda").unwrap(), 0);
    }

    #[test]
    fn test_date_histogram() {
        let timestamps: Vec<String> = [
            "2024-04-01 08:00",
            "2024-04-01 17:45",
            "2024-04-02",
            "garbage",
            "2024-04-03 06:10",
            "2024-04-03 06:20",
            "2024-04-03 07:00",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let day = |d| NaiveDate::from_ymd_opt(2024, 4, d).unwrap();
        assert_eq!(
            date_histogram(&timestamps),
            vec![(day(1), 2), (day(2), 1), (day(3), 3)]
        );
    }
}
