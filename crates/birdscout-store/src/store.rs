use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::models::{County, InsertOutcome, LocationCount, PrivacyCounts, Sighting};
use crate::schema::reset_tables;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The local relational store behind every listing and chart.
///
/// One process owns the file for the whole session; nothing else writes to it.
pub struct ObservationStore {
    conn: Connection,
}

impl ObservationStore {
    /// Open (or create) the store file. Call [`reset_schema`](Self::reset_schema)
    /// before using it.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Drop and recreate both tables. Anything from a previous run is gone.
    pub fn reset_schema(&self) -> Result<()> {
        reset_tables(&self.conn)?;
        Ok(())
    }

    // ==================== Counties ====================

    /// Insert a county; a repeated (code, name) pair is reported, not raised
    pub fn insert_county(&self, county: &County) -> Result<InsertOutcome> {
        let result = self.conn.execute(
            "INSERT INTO counties (state_count, location_code, county) VALUES (?1, ?2, ?3)",
            params![county.state_count, county.location_code, county.name],
        );

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                debug!(
                    "County {} ({}) already stored",
                    county.name, county.location_code
                );
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Counties whose region code contains `state_code`, in insertion order
    pub fn counties_for_state(&self, state_code: &str) -> Result<Vec<County>> {
        let mut stmt = self.conn.prepare(
            "SELECT state_count, location_code, county FROM counties
             WHERE location_code LIKE '%' || ?1 || '%'
             ORDER BY id",
        )?;

        let counties = stmt
            .query_map(params![state_code], county_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(counties)
    }

    /// The county shown as `[state_count]` in the listing for `state_code`
    pub fn find_county(&self, state_count: u32, state_code: &str) -> Result<Option<County>> {
        let county = self
            .conn
            .query_row(
                "SELECT state_count, location_code, county FROM counties
                 WHERE state_count = ?1 AND location_code LIKE '%' || ?2 || '%'
                 ORDER BY id LIMIT 1",
                params![state_count, state_code],
                county_from_row,
            )
            .optional()?;

        Ok(county)
    }

    pub fn county_count(&self) -> Result<u32> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM counties", [], |row| row.get(0))?;
        Ok(count)
    }

    // ==================== Sightings ====================

    pub fn insert_sighting(&self, sighting: &Sighting) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO sightings
            (county_name, county_index, species_code, common_name, scientific_name,
             location_name, observation_date, lat, long, private_location)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                sighting.county_name,
                sighting.county_index,
                sighting.species_code,
                sighting.common_name,
                sighting.scientific_name,
                sighting.location_name,
                sighting.observation_date,
                sighting.lat,
                sighting.long,
                if sighting.private_location { "1" } else { "0" },
            ],
        )?;
        Ok(())
    }

    pub fn has_sightings(&self, county_name: &str) -> Result<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sightings WHERE county_name = ?1)",
            params![county_name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// All sightings of a county in the order they were stored
    pub fn sightings_for_county(&self, county_name: &str) -> Result<Vec<Sighting>> {
        let mut stmt = self.conn.prepare(
            "SELECT county_name, county_index, species_code, common_name, scientific_name,
                    location_name, observation_date, lat, long, private_location
             FROM sightings WHERE county_name = ?1
             ORDER BY id",
        )?;

        let sightings = stmt
            .query_map(params![county_name], sighting_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(sightings)
    }

    /// (lat, long) of the sighting listed as `[county_index]`
    pub fn lookup_sighting_location(
        &self,
        county_index: u32,
        county_name: &str,
    ) -> Result<Option<(String, String)>> {
        let location = self
            .conn
            .query_row(
                "SELECT lat, long FROM sightings WHERE county_index = ?1 AND county_name = ?2",
                params![county_index, county_name],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(location)
    }

    pub fn lookup_species_code(
        &self,
        county_index: u32,
        county_name: &str,
    ) -> Result<Option<String>> {
        let code = self
            .conn
            .query_row(
                "SELECT species_code FROM sightings WHERE county_index = ?1 AND county_name = ?2",
                params![county_index, county_name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(code)
    }

    // ==================== Aggregates ====================

    /// Locations with the most sightings, busiest first
    pub fn top_locations(&self, county_name: &str, limit: u32) -> Result<Vec<LocationCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT location_name, lat, long, private_location, COUNT(location_name)
             FROM sightings WHERE county_name = ?1
             GROUP BY location_name
             ORDER BY COUNT(location_name) DESC
             LIMIT ?2",
        )?;

        let locations = stmt
            .query_map(params![county_name, limit], |row| {
                Ok(LocationCount {
                    location_name: row.get(0)?,
                    lat: row.get(1)?,
                    long: row.get(2)?,
                    private_location: flag_from_text(&row.get::<_, String>(3)?),
                    count: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(locations)
    }

    /// Observation timestamps, oldest first; rows without one are left out
    pub fn observation_dates(&self, county_name: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT observation_date FROM sightings
             WHERE county_name = ?1 AND observation_date IS NOT NULL
             ORDER BY observation_date ASC",
        )?;

        let dates = stmt
            .query_map(params![county_name], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(dates)
    }

    pub fn privacy_counts(&self, county_name: &str) -> Result<PrivacyCounts> {
        let counts = self.conn.query_row(
            "SELECT
                COALESCE(SUM(CASE WHEN private_location = '1' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN private_location = '0' THEN 1 ELSE 0 END), 0)
             FROM sightings WHERE county_name = ?1",
            params![county_name],
            |row| {
                Ok(PrivacyCounts {
                    private: row.get(0)?,
                    public: row.get(1)?,
                })
            },
        )?;

        Ok(counts)
    }
}

fn county_from_row(row: &Row<'_>) -> rusqlite::Result<County> {
    Ok(County {
        state_count: row.get(0)?,
        location_code: row.get(1)?,
        name: row.get(2)?,
    })
}

fn sighting_from_row(row: &Row<'_>) -> rusqlite::Result<Sighting> {
    Ok(Sighting {
        county_name: row.get(0)?,
        county_index: row.get(1)?,
        species_code: row.get(2)?,
        common_name: row.get(3)?,
        scientific_name: row.get(4)?,
        location_name: row.get(5)?,
        observation_date: row.get(6)?,
        lat: row.get(7)?,
        long: row.get(8)?,
        private_location: flag_from_text(&row.get::<_, String>(9)?),
    })
}

fn flag_from_text(value: &str) -> bool {
    value == "1"
}
