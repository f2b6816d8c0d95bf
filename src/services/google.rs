//! Google Maps web-service client
//!
//! Implements [`Geocoder`] with the Geocoding API and [`PlacesSearch`] with the
//! Places nearby and text search endpoints. Every response carries a `status`
//! field; `OK` and `ZERO_RESULTS` are successes, anything else is surfaced as
//! [`MeetupError::Api`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::{Geocoder, PlacesSearch};
use crate::config::GoogleConfig;
use crate::models::{GeoPoint, GeocodedPlace, PlaceResult};
use crate::places::PlaceSearch;
use crate::{MeetupError, Result};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Largest radius the Places endpoints accept, in meters
pub const MAX_PLACES_RADIUS_METERS: f64 = 50_000.0;

/// Client for the Google Maps Geocoding and Places web services
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GoogleMapsClient {
    /// Create a client pointed at the production Google Maps API
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock)
    pub fn with_base_url(api_key: &str, timeout_secs: u64, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("meetup-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MeetupError::api(format!("Failed to create HTTP client: {e}")))?;

        // Trailing slash so that joining "geocode/json" appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| MeetupError::config(format!("Invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Create a client from the `google` configuration section
    ///
    /// # Errors
    ///
    /// Returns [`MeetupError::Config`] when no API key is configured.
    pub fn from_config(config: &GoogleConfig) -> Result<Self> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            MeetupError::config("A Google Maps API key is required (set MEETUP_GOOGLE__API_KEY)")
        })?;
        Self::with_base_url(api_key, config.timeout_seconds.into(), &config.base_url)
    }

    async fn get_results<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| MeetupError::api(format!("Invalid endpoint '{path}': {e}")))?;
        debug!("Google Maps request: {}", url);

        let start_time = Instant::now();
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| MeetupError::api(format!("Request to {path} failed: {e}")))?;

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| MeetupError::api(format!("Invalid response from {path}: {e}")))?;

        let elapsed = start_time.elapsed();
        if elapsed.as_secs() > 5 {
            warn!("Slow Google Maps response from {}: {:.3}s", path, elapsed.as_secs_f64());
        }

        envelope.into_results(path)
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodedPlace>> {
        info!("Geocoding '{}'", address);
        let results: Vec<GeocodeResult> = self
            .get_results("geocode/json", &[("address", address.to_string())])
            .await?;

        let places = results
            .into_iter()
            .map(GeocodeResult::into_place)
            .collect::<Result<Vec<_>>>()?;
        info!("Geocoding '{}' returned {} result(s)", address, places.len());
        Ok(places)
    }
}

#[async_trait]
impl PlacesSearch for GoogleMapsClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        center: GeoPoint,
        radius_meters: f64,
        search: &PlaceSearch,
    ) -> Result<Vec<PlaceResult>> {
        let location = format!("{},{}", center.latitude, center.longitude);
        let radius = format!("{:.0}", radius_meters.min(MAX_PLACES_RADIUS_METERS));
        info!("Searching places: {:?} within {} m of {}", search, radius, location);

        let (path, params) = match search {
            PlaceSearch::Nearby { place_type } => (
                "place/nearbysearch/json",
                vec![
                    ("location", location),
                    ("radius", radius),
                    ("type", place_type.clone()),
                ],
            ),
            PlaceSearch::Text { query } => (
                "place/textsearch/json",
                vec![
                    ("query", query.clone()),
                    ("location", location),
                    ("radius", radius),
                    ("type", "establishment".to_string()),
                ],
            ),
        };

        let results: Vec<PlaceHit> = self.get_results(path, &params).await?;
        results.into_iter().map(PlaceHit::into_place).collect()
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    fn into_results(self, path: &str) -> Result<Vec<T>> {
        match self.status.as_str() {
            "OK" => Ok(self.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => Err(MeetupError::api(match self.error_message {
                Some(message) => format!("{path} returned {status}: {message}"),
                None => format!("{path} returned {status}"),
            })),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    fn into_point(self) -> Result<GeoPoint> {
        GeoPoint::new(self.lat, self.lng)
            .map_err(|e| MeetupError::api(format!("Invalid coordinates in response: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    #[serde(default)]
    name: Option<String>,
    geometry: Geometry,
}

impl GeocodeResult {
    fn into_place(self) -> Result<GeocodedPlace> {
        Ok(GeocodedPlace {
            location: self.geometry.location.into_point()?,
            formatted_address: self.formatted_address,
            name: self.name,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PlaceHit {
    name: String,
    /// Missing from nearby-search hits, which only carry a `vicinity`
    #[serde(default)]
    formatted_address: Option<String>,
    geometry: Geometry,
}

impl PlaceHit {
    fn into_place(self) -> Result<PlaceResult> {
        Ok(PlaceResult {
            location: self.geometry.location.into_point()?,
            name: self.name,
            address: self.formatted_address.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(status: &str, error_message: Option<&str>) -> ApiEnvelope<u32> {
        ApiEnvelope {
            results: vec![1, 2],
            status: status.to_string(),
            error_message: error_message.map(str::to_string),
        }
    }

    #[test]
    fn test_ok_status_returns_results() {
        assert_eq!(envelope("OK", None).into_results("geocode/json").unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_zero_results_is_empty() {
        assert!(
            envelope("ZERO_RESULTS", None)
                .into_results("geocode/json")
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_error_status_carries_message() {
        let err = envelope("REQUEST_DENIED", Some("The provided API key is invalid."))
            .into_results("geocode/json")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("REQUEST_DENIED"));
        assert!(message.contains("API key is invalid"));
    }

    #[test]
    fn test_place_hit_prefers_formatted_address() {
        let hit: PlaceHit = serde_json::from_value(serde_json::json!({
            "name": "Joe's Pizza",
            "formatted_address": "7 Carmine St, New York",
            "vicinity": "7 Carmine St",
            "geometry": { "location": { "lat": 40.7305, "lng": -74.0021 } }
        }))
        .unwrap();
        let place = hit.into_place().unwrap();
        assert_eq!(place.address, "7 Carmine St, New York");
    }

    #[test]
    fn test_place_hit_without_formatted_address_is_labelled_by_name() {
        let hit: PlaceHit = serde_json::from_value(serde_json::json!({
            "name": "Joe's Pizza",
            "vicinity": "7 Carmine St",
            "geometry": { "location": { "lat": 40.7305, "lng": -74.0021 } }
        }))
        .unwrap();
        let place = hit.into_place().unwrap();
        assert_eq!(place.address, "");
        assert_eq!(place.label(), "Joe's Pizza");
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let hit: GeocodeResult = serde_json::from_value(serde_json::json!({
            "formatted_address": "Nowhere",
            "geometry": { "location": { "lat": 123.0, "lng": 0.0 } }
        }))
        .unwrap();
        assert!(matches!(hit.into_place(), Err(MeetupError::Api { .. })));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = GoogleConfig::default();
        assert!(matches!(
            GoogleMapsClient::from_config(&config),
            Err(MeetupError::Config { .. })
        ));
    }
}
