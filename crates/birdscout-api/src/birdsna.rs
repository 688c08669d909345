//! Species profile pages on birdsna.org.
//!
//! The page is HTML meant for people, so parsing is strict about the handful
//! of elements it needs and reports which one was missing when the layout
//! does not match.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BIRDSNA_BASE: &str = "https://birdsna.org";

/// Shown when the page carries no conservation status badge
pub const STATUS_NOT_LISTED: &str = "Status not listed";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("Species page is missing the {0}")]
    MissingElement(&'static str),

    #[error("Invalid selector {0}")]
    InvalidSelector(String),
}

#[derive(Debug, Clone)]
pub struct BirdsnaEndpoints {
    base_url: String,
}

impl BirdsnaEndpoints {
    pub fn new() -> Self {
        Self::with_base_url(BIRDSNA_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn species_url(&self, species_code: &str) -> String {
        format!(
            "{}/Species-Account/bna/species/{}/introduction",
            self.base_url,
            urlencoding::encode(species_code)
        )
    }
}

impl Default for BirdsnaEndpoints {
    fn default() -> Self {
        Self::new()
    }
}

/// What we pull off a species profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesPage {
    pub image_url: String,
    pub status: String,
    /// Toolbar breadcrumb, most general first (order, family, genus)
    pub taxonomy: Vec<String>,
}

impl SpeciesPage {
    pub fn parse(html: &str) -> Result<Self, ScrapeError> {
        let document = Html::parse_document(html);

        let image_url = Self::parse_image(&document)?;
        let status = Self::parse_status(&document)?;
        let taxonomy = Self::parse_taxonomy(&document)?;

        Ok(Self {
            image_url,
            status,
            taxonomy,
        })
    }

    pub fn order(&self) -> &str {
        self.taxonomy_level(0)
    }

    pub fn family(&self) -> &str {
        self.taxonomy_level(1)
    }

    pub fn genus(&self) -> &str {
        self.taxonomy_level(2)
    }

    fn taxonomy_level(&self, level: usize) -> &str {
        self.taxonomy.get(level).map(String::as_str).unwrap_or("")
    }

    fn parse_image(document: &Html) -> Result<String, ScrapeError> {
        let container = document
            .select(&selector("div.AspectRatioContent")?)
            .next()
            .ok_or(ScrapeError::MissingElement("image container"))?;

        let img = container
            .select(&selector("img")?)
            .next()
            .ok_or(ScrapeError::MissingElement("image"))?;

        img.value()
            .attr("src")
            .map(str::to_string)
            .ok_or(ScrapeError::MissingElement("image source"))
    }

    /// Badge text reads like "Status: Least Concern"; the leading label is dropped
    fn parse_status(document: &Html) -> Result<String, ScrapeError> {
        let badge = document
            .select(&selector("div.u-text-3.Tooltip.Tooltip--sm")?)
            .next();

        Ok(match badge {
            Some(badge) => element_text(badge)
                .split_whitespace()
                .skip(1)
                .collect::<Vec<_>>()
                .join(" "),
            None => STATUS_NOT_LISTED.to_string(),
        })
    }

    fn parse_taxonomy(document: &Html) -> Result<Vec<String>, ScrapeError> {
        let toolbar = document
            .select(&selector("div.Toolbar-group.Toolbar-group--secondary")?)
            .next()
            .ok_or(ScrapeError::MissingElement("taxonomy toolbar"))?;

        Ok(toolbar
            .select(&selector("div.Toolbar-item")?)
            .map(|item| element_text(item).trim().to_string())
            .collect())
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::InvalidSelector(format!("{}: {}", css, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}
