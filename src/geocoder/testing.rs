// Geocoder doubles for tests
use crate::geocoder::Geocoder;
use crate::model::{Coordinates, GeocodeError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Answers from a fixed table and records every address it was asked about.
#[derive(Default)]
pub struct TableGeocoder {
    table: HashMap<String, Coordinates>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl TableGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, lat: f64, lon: f64) -> Self {
        self.table.insert(address.to_string(), Coordinates { lat, lon });
        self
    }

    /// Makes lookups for `address` fail with an invalid-coordinate fault.
    pub fn failing(mut self, address: &str) -> Self {
        self.failing.push(address.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Geocoder for TableGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        self.calls.lock().unwrap().push(address.to_string());
        if self.failing.iter().any(|a| a == address) {
            return Err(GeocodeError::InvalidCoordinate(address.to_string()));
        }
        Ok(self.table.get(address).copied())
    }
}

/// Never answers before `delay`.
pub struct SlowGeocoder {
    pub delay: Duration,
}

#[async_trait::async_trait]
impl Geocoder for SlowGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        tokio::time::sleep(self.delay).await;
        Ok(Some(Coordinates { lat: 0.0, lon: 0.0 }))
    }
}
