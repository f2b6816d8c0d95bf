//! Venue search around the meetup center
//!
//! Decides how a user's query is sent to the places collaborator, adds the hits
//! to the plan, and classifies geocoded results as venues or plain addresses.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{EntryId, EntryKind, GeocodedPlace, PlaceResult};
use crate::planner::PlanningSession;
use crate::services::PlacesSearch;
use crate::{MeetupError, Result};

/// At most this many venues from one search are added to the plan
pub const MAX_VENUES_ADDED: usize = 3;

/// Common category queries and the place type they map to
const CATEGORY_TYPES: [(&str, &str); 8] = [
    ("restaurants", "restaurant"),
    ("cafes", "cafe"),
    ("bars", "bar"),
    ("parks", "park"),
    ("museums", "museum"),
    ("shopping", "shopping_mall"),
    ("entertainment", "movie_theater"),
    ("gyms", "gym"),
];

/// How a venue query is sent to the places collaborator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlaceSearch {
    /// Nearby search restricted to one place type
    Nearby { place_type: String },
    /// Free-text search restricted to establishments
    Text { query: String },
}

impl PlaceSearch {
    /// Map a user query to a search
    ///
    /// Known categories (case-insensitive) become typed nearby searches,
    /// everything else is a text search.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.trim();
        let lowered = query.to_lowercase();
        CATEGORY_TYPES
            .iter()
            .find(|(category, _)| *category == lowered)
            .map_or_else(
                || PlaceSearch::Text {
                    query: query.to_string(),
                },
                |(_, place_type)| PlaceSearch::Nearby {
                    place_type: (*place_type).to_string(),
                },
            )
    }
}

/// Search for venues around the session's meetup center
///
/// Single-entry sessions search with the minimum radius. At most
/// [`MAX_VENUES_ADDED`] venues are returned.
///
/// # Errors
///
/// - [`MeetupError::NoMeetupCenter`] when the session is empty.
/// - [`MeetupError::InvalidInput`] for a blank query.
/// - [`MeetupError::NoVenuesFound`] when the search returns nothing.
/// - Whatever the collaborator returns on failure.
pub async fn find_venues(
    places: &dyn PlacesSearch,
    session: &PlanningSession,
    query: &str,
) -> Result<Vec<PlaceResult>> {
    let center = session.search_center()?;
    if query.trim().is_empty() {
        return Err(MeetupError::invalid_input("Please enter something to search for"));
    }

    let search = PlaceSearch::from_query(query);
    let radius = center.search_radius_or_min();
    info!(
        "Searching for '{}' around {} within {:.0} m",
        query,
        center.centroid.format_coordinates(),
        radius
    );

    let mut venues = places.search(center.centroid, radius, &search).await?;
    if venues.is_empty() {
        return Err(MeetupError::no_venues(query.trim()));
    }
    venues.truncate(MAX_VENUES_ADDED);
    Ok(venues)
}

/// Add venues to the plan as points of interest, skipping duplicates
pub fn add_venues(session: &mut PlanningSession, venues: &[PlaceResult]) -> Vec<EntryId> {
    venues
        .iter()
        .filter_map(|venue| {
            match session.add(
                venue.label(),
                venue.location,
                EntryKind::PointOfInterest,
                Some(venue.name.clone()),
            ) {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!("Not adding venue '{}': {}", venue.name, e);
                    None
                }
            }
        })
        .collect()
}

/// Heuristic: does a geocoded result look like a business rather than an address?
///
/// True when the geocoder knows the place by a name that differs from its
/// formatted address and that name matches what the user typed, ignoring case.
/// Address-like business names fool it; treat the answer as a guess.
#[must_use]
pub fn is_business_poi(input: &str, place: &GeocodedPlace) -> bool {
    match place.name.as_deref() {
        Some(name) => {
            !name.is_empty()
                && name != place.formatted_address
                && name.to_lowercase() == input.to_lowercase()
        }
        None => false,
    }
}

/// Entry kind and venue name for a geocoded input, per [`is_business_poi`]
#[must_use]
pub fn classify(input: &str, place: &GeocodedPlace) -> (EntryKind, Option<String>) {
    if is_business_poi(input, place) {
        debug!("Treating '{}' as a point of interest", input);
        (EntryKind::PointOfInterest, Some(input.to_string()))
    } else {
        (EntryKind::Address, None)
    }
}
