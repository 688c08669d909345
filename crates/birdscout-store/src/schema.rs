//! Table definitions.
//!
//! Tables:
//! - counties: reference data for the selected state
//! - sightings: recent observations per county

use rusqlite::{Connection, Result};

/// Drop both tables if present and create them empty
pub fn reset_tables(conn: &Connection) -> Result<()> {
    conn.execute("DROP TABLE IF EXISTS counties", [])?;
    conn.execute("DROP TABLE IF EXISTS sightings", [])?;

    conn.execute(
        r#"
        CREATE TABLE counties (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            state_count INTEGER NOT NULL,
            location_code TEXT NOT NULL,
            county TEXT NOT NULL,
            UNIQUE(location_code, county)
        )
        "#,
        [],
    )?;

    // lat/long/private_location stay TEXT: they are display values, never math
    conn.execute(
        r#"
        CREATE TABLE sightings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            county_name TEXT NOT NULL,
            county_index INTEGER NOT NULL,
            species_code TEXT NOT NULL,
            common_name TEXT NOT NULL,
            scientific_name TEXT NOT NULL,
            location_name TEXT,
            observation_date TEXT,
            lat TEXT NOT NULL,
            long TEXT NOT NULL,
            private_location TEXT NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_sightings_county ON sightings(county_name, county_index)",
        [],
    )?;

    Ok(())
}
