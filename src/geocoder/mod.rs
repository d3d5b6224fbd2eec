// Geocoder module: address text to coordinates.

pub mod nominatim;
#[cfg(test)]
pub mod testing;

use crate::model::{Coordinates, GeocodeError};

pub use nominatim::NominatimGeocoder;

#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for `address`, or `None` when nothing matches.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError>;
}
