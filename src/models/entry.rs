//! Entries a meetup is being planned around

use std::fmt;

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Identifier of a planning entry, unique within its session
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether an entry is a bare address or a named venue
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    Address,
    PointOfInterest,
}

/// An address or venue the user added to the plan
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlanningEntry {
    pub id: EntryId,
    /// Formatted address; entries are deduplicated on this string
    pub label: String,
    pub location: GeoPoint,
    pub kind: EntryKind,
    /// Venue display name, set for points of interest
    pub place_name: Option<String>,
}

impl PlanningEntry {
    /// Name to show for this entry: the venue name when known, else the label
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.place_name.as_deref().unwrap_or(&self.label)
    }

    #[must_use]
    pub fn is_point_of_interest(&self) -> bool {
        self.kind == EntryKind::PointOfInterest
    }
}
