//! Data models for the meetup finder
//!
//! This module contains the core domain models organized by concern:
//! - Location: geographic points
//! - Entry: the addresses and venues a meetup is planned around
//! - Place: geocoding and places-search results

pub mod entry;
pub mod location;
pub mod place;

// Re-export all public types for convenient access
pub use entry::{EntryId, EntryKind, PlanningEntry};
pub use location::GeoPoint;
pub use place::{GeocodedPlace, PlaceResult};
