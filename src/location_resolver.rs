//! Location Resolution Module
//!
//! This module turns what a user typed (coordinates, an address, or a venue
//! name) into a geocoded place that can be added to a plan.

use tracing::debug;

use crate::models::{GeoPoint, GeocodedPlace};
use crate::services::Geocoder;
use crate::{MeetupError, Result};

/// Types of location input
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Literal coordinates
    Coordinates(GeoPoint),
    /// Address or place name to geocode
    Query(String),
}

/// Location parsing utilities
pub struct LocationParser;

impl LocationParser {
    /// Parse location input
    ///
    /// # Errors
    ///
    /// Returns [`MeetupError::InvalidInput`] for blank input.
    pub fn parse(input: &str) -> Result<LocationInput> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MeetupError::invalid_input(
                "Please enter an address or place name",
            ));
        }

        match Self::parse_coordinates(input) {
            Some(point) => Ok(LocationInput::Coordinates(point)),
            None => Ok(LocationInput::Query(input.to_string())),
        }
    }

    /// Parse coordinates from a string like "46.8182,8.2275" or "46.8182 8.2275"
    ///
    /// Anything that is not exactly two in-range numbers is not coordinates.
    #[must_use]
    pub fn parse_coordinates(input: &str) -> Option<GeoPoint> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        let [lat, lng] = parts.as_slice() else {
            return None;
        };
        let lat = lat.parse::<f64>().ok()?;
        let lng = lng.parse::<f64>().ok()?;
        GeoPoint::new(lat, lng).ok()
    }
}

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve raw user input into a geocoded place
    pub async fn resolve(geocoder: &dyn Geocoder, input: &str) -> Result<GeocodedPlace> {
        debug!("Resolving location input: {:?}", input);

        let place = match LocationParser::parse(input)? {
            LocationInput::Coordinates(point) => {
                GeocodedPlace::new(point.format_coordinates(), point)
            }
            LocationInput::Query(query) => Self::resolve_query(geocoder, &query).await?,
        };

        debug!(
            "Resolved location: {} at ({}, {})",
            place.formatted_address, place.location.latitude, place.location.longitude
        );

        Ok(place)
    }

    /// Geocode a query, keeping the best match
    async fn resolve_query(geocoder: &dyn Geocoder, query: &str) -> Result<GeocodedPlace> {
        debug!("Geocoding query: {}", query);

        geocoder
            .geocode(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| MeetupError::location_not_found(query))
    }
}
