//! Geocoding and places-search collaborators
//!
//! The meetup logic never talks to a maps provider directly. It goes through
//! the [`Geocoder`] and [`PlacesSearch`] traits so tests can swap in fakes and
//! other providers can be added next to [`google::GoogleMapsClient`].

use async_trait::async_trait;

use crate::Result;
use crate::models::{GeoPoint, GeocodedPlace, PlaceResult};
use crate::places::PlaceSearch;

pub mod google;

pub use google::GoogleMapsClient;

/// Turns an address or place name into coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocode `address`, best match first. An empty list means no match.
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodedPlace>>;
}

/// Finds venues around a point
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn search(
        &self,
        center: GeoPoint,
        radius_meters: f64,
        search: &PlaceSearch,
    ) -> Result<Vec<PlaceResult>>;
}
