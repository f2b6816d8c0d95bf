//! `meetup-finder` - find a fair meeting point for a group
//!
//! This library geocodes the addresses and venues a group wants to meet
//! around, computes their meetup center and a search radius, and finds venues
//! near that center.

pub mod config;
pub mod error;
pub mod location_resolver;
pub mod meetup;
pub mod models;
pub mod places;
pub mod planner;
pub mod services;

// Re-export core types for public API
pub use config::MeetupConfig;
pub use error::MeetupError;
pub use location_resolver::{LocationInput, LocationParser, LocationResolver};
pub use meetup::{MeetupCenter, MeetupCenterCalculator};
pub use models::{EntryId, EntryKind, GeoPoint, GeocodedPlace, PlaceResult, PlanningEntry};
pub use places::PlaceSearch;
pub use planner::PlanningSession;
pub use services::{Geocoder, GoogleMapsClient, PlacesSearch};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MeetupError>;
