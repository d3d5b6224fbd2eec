// Core structs: ArticleRecord, CandidateRecord, FinalizedRecord and the error taxonomy
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// One feed item, as handed over by the feed source.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub title: String,
    pub published: Option<DateTime<Utc>>,
    pub body: String,
}

/// Unverified mention of a place found inside one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub name: String,
    pub address_text: String,
    pub snippet: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A geocoded restaurant. Field names on the wire are shared with the map
/// page and with every dataset written so far, so they must not change.
/// `date_added` is kept as text: older records may carry other date formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedRecord {
    pub name: String,
    #[serde(rename = "address")]
    pub address_text: String,
    #[serde(rename = "blurb")]
    pub snippet: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    pub date_added: String,
}

impl FinalizedRecord {
    pub fn from_candidate(candidate: CandidateRecord, coords: Coordinates, date_added: NaiveDate) -> Self {
        Self {
            name: candidate.name,
            address_text: candidate.address_text,
            snippet: candidate.snippet,
            latitude: coords.lat,
            longitude: coords.lon,
            date_added: date_added.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("feed could not be parsed: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("article body is {size} bytes, limit is {limit}")]
    Oversized { size: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoder responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("geocoder returned invalid coordinate {0:?}")]
    InvalidCoordinate(String),
    #[error("geocoder did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dataset I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to replace dataset file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write map: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode map markers: {0}")]
    Json(#[from] serde_json::Error),
}

/// Faults that end a run. Everything else is recovered where it happens.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Geocoder(#[from] GeocodeError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
