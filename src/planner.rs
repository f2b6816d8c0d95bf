//! Planning session state
//!
//! A [`PlanningSession`] owns the ordered list of entries a meetup is planned
//! around and keeps the derived [`MeetupCenter`] in step with it. Every add and
//! remove recomputes the center from the full entry set.

use tracing::{debug, warn};

use crate::meetup::{MeetupCenter, MeetupCenterCalculator};
use crate::models::{EntryId, EntryKind, GeoPoint, GeocodedPlace, PlanningEntry};
use crate::{MeetupError, Result};

/// The entries currently being planned around and their meetup center
#[derive(Debug, Default, Clone)]
pub struct PlanningSession {
    entries: Vec<PlanningEntry>,
    center: Option<MeetupCenter>,
    next_id: u64,
}

impl PlanningSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry and recompute the center
    ///
    /// Entries are deduplicated on their label with an exact, case-sensitive
    /// comparison.
    ///
    /// # Errors
    ///
    /// Returns [`MeetupError::DuplicateEntry`] when an entry with the same
    /// label is already in the session.
    pub fn add(
        &mut self,
        label: impl Into<String>,
        location: GeoPoint,
        kind: EntryKind,
        place_name: Option<String>,
    ) -> Result<EntryId> {
        let label = label.into();
        if self.contains_label(&label) {
            warn!("Skipping duplicate entry: {}", label);
            return Err(MeetupError::duplicate(label));
        }

        self.next_id += 1;
        let id = EntryId(self.next_id);
        debug!(
            "Adding {:?} {} '{}' at ({:.4}, {:.4})",
            kind, id, label, location.latitude, location.longitude
        );

        self.entries.push(PlanningEntry {
            id,
            label,
            location,
            kind,
            place_name,
        });
        self.recompute();
        Ok(id)
    }

    /// Add a geocoded place, labelled with its formatted address
    pub fn add_place(
        &mut self,
        place: &GeocodedPlace,
        kind: EntryKind,
        place_name: Option<String>,
    ) -> Result<EntryId> {
        self.add(
            place.formatted_address.clone(),
            place.location,
            kind,
            place_name,
        )
    }

    /// Remove an entry by id and recompute the center
    ///
    /// Unknown ids leave the session untouched.
    pub fn remove(&mut self, id: EntryId) -> Option<PlanningEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(index);
        debug!("Removed entry {} '{}'", removed.id, removed.label);
        self.recompute();
        Some(removed)
    }

    #[must_use]
    pub fn contains_label(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e.label == label)
    }

    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&PlanningEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[PlanningEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current meetup center, if any entry has been added
    #[must_use]
    pub fn center(&self) -> Option<&MeetupCenter> {
        self.center.as_ref()
    }

    /// Center a venue search should run around
    ///
    /// # Errors
    ///
    /// Returns [`MeetupError::NoMeetupCenter`] when the session is empty.
    pub fn search_center(&self) -> Result<&MeetupCenter> {
        self.center.as_ref().ok_or(MeetupError::NoMeetupCenter)
    }

    /// Items to share the plan with, in entry order
    ///
    /// Venues are shared by name so they geocode back to the venue; addresses
    /// are shared by their formatted address.
    #[must_use]
    pub fn shareable_items(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| match (&e.kind, &e.place_name) {
                (EntryKind::PointOfInterest, Some(name)) => name.as_str(),
                _ => e.label.as_str(),
            })
            .collect()
    }

    fn recompute(&mut self) {
        self.center = MeetupCenterCalculator::compute_meetup_center(&self.entries);
        match &self.center {
            Some(center) => debug!(
                "Meetup center for {} entries: {} (radius {:?} m)",
                self.entries.len(),
                center.centroid.format_coordinates(),
                center.radius_meters
            ),
            None => debug!("Meetup center cleared"),
        }
    }
}
