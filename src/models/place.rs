//! Results returned by the geocoding and places collaborators

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A geocoded address or venue
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub formatted_address: String,
    /// Display name when the geocoder knows the place by name
    pub name: Option<String>,
    pub location: GeoPoint,
}

impl GeocodedPlace {
    #[must_use]
    pub fn new(formatted_address: String, location: GeoPoint) -> Self {
        Self {
            formatted_address,
            name: None,
            location,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }
}

/// A venue found by a places search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceResult {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
}

impl PlaceResult {
    /// Label used when the venue is added to a plan
    #[must_use]
    pub fn label(&self) -> &str {
        if self.address.is_empty() {
            &self.name
        } else {
            &self.address
        }
    }
}
