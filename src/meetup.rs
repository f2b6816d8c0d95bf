//! Meetup center computation
//!
//! Given the points a group wants to meet around, this module computes a single
//! representative center and, when there is more than one point, the radius a
//! venue search should cover to stay convenient for everyone.
//!
//! The centroid is a planar average of latitudes and longitudes. That is a good
//! approximation at metropolitan scale but degrades near the antimeridian and
//! the poles.

use serde::{Deserialize, Serialize};

use crate::models::{GeoPoint, PlanningEntry};
use crate::{MeetupError, Result};

/// Mean Earth radius used by the haversine distance, in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Share of the farthest point's distance covered by the search radius
pub const RADIUS_FACTOR: f64 = 0.8;

/// Smallest search radius handed to a venue search, in meters
pub const MIN_SEARCH_RADIUS_METERS: f64 = 1000.0;

/// Center of a meetup and how far to search for venues around it
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct MeetupCenter {
    pub centroid: GeoPoint,
    /// Only present when the center was derived from two or more points
    pub radius_meters: Option<f64>,
}

impl MeetupCenter {
    /// Radius to search with, falling back to the minimum for single-point centers
    #[must_use]
    pub fn search_radius_or_min(&self) -> f64 {
        self.radius_meters.unwrap_or(MIN_SEARCH_RADIUS_METERS)
    }
}

/// Pure meetup-center calculations
pub struct MeetupCenterCalculator;

impl MeetupCenterCalculator {
    /// Arithmetic mean of latitudes and of longitudes
    ///
    /// # Errors
    ///
    /// Returns [`MeetupError::InvalidInput`] when `points` is empty.
    pub fn compute_centroid(points: &[GeoPoint]) -> Result<GeoPoint> {
        if points.is_empty() {
            return Err(MeetupError::invalid_input(
                "Cannot compute a centroid of zero points",
            ));
        }

        let (total_lat, total_lng) = points.iter().fold((0.0, 0.0), |(lat, lng), p| {
            (lat + p.latitude, lng + p.longitude)
        });
        let count = points.len() as f64;

        Ok(GeoPoint::new_unchecked(total_lat / count, total_lng / count))
    }

    /// Great-circle distance between two points in meters
    #[must_use]
    pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
        // Fixed argument order keeps the result bit-for-bit symmetric.
        let (from, to) = if (a.latitude, a.longitude) <= (b.latitude, b.longitude) {
            (a, b)
        } else {
            (b, a)
        };

        let lat_from = from.latitude.to_radians();
        let lat_to = to.latitude.to_radians();
        let d_lat = (to.latitude - from.latitude).to_radians();
        let d_lng = (to.longitude - from.longitude).to_radians();

        // Rounding can push `a` past 1 for near-antipodal pairs.
        let a = ((d_lat / 2.0).sin().powi(2)
            + lat_from.cos() * lat_to.cos() * (d_lng / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);

        2.0 * a.sqrt().atan2((1.0 - a).sqrt()) * EARTH_RADIUS_METERS
    }

    /// 80% of the farthest point's distance from `center`, never below 1000 m
    ///
    /// # Errors
    ///
    /// Returns [`MeetupError::InvalidInput`] when `points` is empty or a
    /// distance is not a finite number.
    pub fn compute_search_radius(center: GeoPoint, points: &[GeoPoint]) -> Result<f64> {
        if points.is_empty() {
            return Err(MeetupError::invalid_input(
                "Cannot compute a search radius for zero points",
            ));
        }

        let max_distance = points.iter().try_fold(0.0_f64, |max, p| {
            let distance = Self::haversine_distance(center, *p);
            if distance.is_finite() {
                Ok(max.max(distance))
            } else {
                Err(MeetupError::invalid_input(format!(
                    "Distance from {} to {} is not a finite number",
                    center.format_coordinates(),
                    p.format_coordinates()
                )))
            }
        })?;

        Ok((max_distance * RADIUS_FACTOR).max(MIN_SEARCH_RADIUS_METERS))
    }

    /// Meetup center for the entries currently being planned around
    #[must_use]
    pub fn compute_meetup_center(entries: &[PlanningEntry]) -> Option<MeetupCenter> {
        let points: Vec<GeoPoint> = entries.iter().map(|e| e.location).collect();
        Self::meetup_center_for_points(&points)
    }

    /// Meetup center for bare points
    ///
    /// No points gives no center, one point is its own center with no radius,
    /// and two or more get a centroid plus search radius.
    #[must_use]
    pub fn meetup_center_for_points(points: &[GeoPoint]) -> Option<MeetupCenter> {
        match points {
            [] => None,
            [only] => Some(MeetupCenter {
                centroid: *only,
                radius_meters: None,
            }),
            _ => {
                let centroid = Self::compute_centroid(points).ok()?;
                let radius = Self::compute_search_radius(centroid, points).ok()?;
                Some(MeetupCenter {
                    centroid,
                    radius_meters: Some(radius),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, EntryKind};

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new_unchecked(lat, lng)
    }

    fn entry(id: u64, lat: f64, lng: f64) -> PlanningEntry {
        PlanningEntry {
            id: EntryId(id),
            label: format!("entry {id}"),
            location: point(lat, lng),
            kind: EntryKind::Address,
            place_name: None,
        }
    }

    #[test]
    fn test_centroid_of_two_points() {
        let centroid =
            MeetupCenterCalculator::compute_centroid(&[point(40.0, -74.0), point(41.0, -74.0)])
                .unwrap();
        assert_eq!(centroid, point(40.5, -74.0));
    }

    #[test]
    fn test_centroid_rejects_empty_input() {
        assert!(matches!(
            MeetupCenterCalculator::compute_centroid(&[]),
            Err(MeetupError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_haversine_identical_points_is_zero() {
        let p = point(40.7128, -74.0060);
        assert_eq!(MeetupCenterCalculator::haversine_distance(p, p), 0.0);
    }

    #[test]
    fn test_haversine_half_degree_of_latitude() {
        let d = MeetupCenterCalculator::haversine_distance(point(40.5, -74.0), point(40.0, -74.0));
        assert!((d - 55_597.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_haversine_antipodal_points() {
        let d = MeetupCenterCalculator::haversine_distance(point(0.0, 0.0), point(0.0, 180.0));
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - half_circumference).abs() < 10.0, "got {d}");
    }

    #[test]
    fn test_haversine_mirrored_antipodal_pairs_are_finite() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
        for step in -899..=899 {
            let lat = f64::from(step) / 10.0;
            for lng in [0.0, 45.0, 179.9] {
                let d = MeetupCenterCalculator::haversine_distance(
                    point(lat, lng),
                    point(-lat, lng - 180.0),
                );
                assert!(d.is_finite(), "NaN for ({lat}, {lng})");
                assert!((d - half_circumference).abs() < 1.0, "({lat}, {lng}) got {d}");
            }
        }
    }

    #[test]
    fn test_search_radius_for_near_antipodal_pair() {
        let points = [point(-87.5, 0.0), point(87.5, -180.0)];
        let center = MeetupCenterCalculator::compute_centroid(&points).unwrap();
        let radius = MeetupCenterCalculator::compute_search_radius(center, &points).unwrap();
        let south = MeetupCenterCalculator::haversine_distance(center, points[0]);
        let north = MeetupCenterCalculator::haversine_distance(center, points[1]);
        assert!(radius.is_finite());
        assert!(radius > 1_000_000.0, "got {radius}");
        assert!((radius - RADIUS_FACTOR * south.max(north)).abs() < 1e-6);
    }

    #[test]
    fn test_search_radius_rejects_non_finite_distance() {
        let points = [point(40.0, -74.0), point(f64::NAN, -74.0)];
        assert!(matches!(
            MeetupCenterCalculator::compute_search_radius(point(40.0, -74.0), &points),
            Err(MeetupError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_search_radius_two_points() {
        let points = [point(40.0, -74.0), point(41.0, -74.0)];
        let center = point(40.5, -74.0);
        let radius = MeetupCenterCalculator::compute_search_radius(center, &points).unwrap();
        let expected = 0.8 * MeetupCenterCalculator::haversine_distance(center, point(40.0, -74.0));
        assert!((radius - expected).abs() < 1e-6);
        assert!((radius - 44_478.0).abs() < 1.0, "got {radius}");
    }

    #[test]
    fn test_search_radius_collinear_tie() {
        let points = [point(40.0, -74.0), point(40.0, -73.0), point(40.0, -72.0)];
        let center = MeetupCenterCalculator::compute_centroid(&points).unwrap();
        assert_eq!(center, point(40.0, -73.0));

        let west = MeetupCenterCalculator::haversine_distance(center, points[0]);
        let east = MeetupCenterCalculator::haversine_distance(center, points[2]);
        assert!((west - east).abs() < 1e-6);

        let radius = MeetupCenterCalculator::compute_search_radius(center, &points).unwrap();
        assert_eq!(radius, 0.8 * west.max(east));
        assert!(radius > 60_000.0 && radius < 75_000.0, "got {radius}");
    }

    #[test]
    fn test_search_radius_floor_for_close_points() {
        let points = [point(40.0, -74.0), point(40.01, -74.0)];
        let center = MeetupCenterCalculator::compute_centroid(&points).unwrap();
        let radius = MeetupCenterCalculator::compute_search_radius(center, &points).unwrap();
        assert_eq!(radius, MIN_SEARCH_RADIUS_METERS);
    }

    #[test]
    fn test_search_radius_identical_points_hits_floor() {
        let p = point(51.5074, -0.1278);
        let radius = MeetupCenterCalculator::compute_search_radius(p, &[p, p, p]).unwrap();
        assert_eq!(radius, 1000.0);
    }

    #[test]
    fn test_search_radius_rejects_empty_input() {
        assert!(matches!(
            MeetupCenterCalculator::compute_search_radius(point(0.0, 0.0), &[]),
            Err(MeetupError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_meetup_center_empty() {
        assert_eq!(MeetupCenterCalculator::compute_meetup_center(&[]), None);
    }

    #[test]
    fn test_meetup_center_single_entry() {
        let center =
            MeetupCenterCalculator::compute_meetup_center(&[entry(1, 40.7128, -74.0060)]).unwrap();
        assert_eq!(center.centroid, point(40.7128, -74.0060));
        assert_eq!(center.radius_meters, None);
        assert_eq!(center.search_radius_or_min(), MIN_SEARCH_RADIUS_METERS);
    }

    #[test]
    fn test_meetup_center_multiple_entries() {
        let center = MeetupCenterCalculator::compute_meetup_center(&[
            entry(1, 40.0, -74.0),
            entry(2, 41.0, -74.0),
        ])
        .unwrap();
        assert_eq!(center.centroid, point(40.5, -74.0));
        let radius = center.radius_meters.unwrap();
        assert!((radius - 44_478.0).abs() < 1.0, "got {radius}");
    }

    #[test]
    fn test_meetup_center_ignores_order() {
        let forward = MeetupCenterCalculator::meetup_center_for_points(&[
            point(40.0, -74.0),
            point(41.0, -74.0),
            point(40.5, -73.0),
        ]);
        let reversed = MeetupCenterCalculator::meetup_center_for_points(&[
            point(40.5, -73.0),
            point(41.0, -74.0),
            point(40.0, -74.0),
        ]);
        let (forward, reversed) = (forward.unwrap(), reversed.unwrap());
        assert!((forward.centroid.latitude - reversed.centroid.latitude).abs() < 1e-12);
        assert!((forward.centroid.longitude - reversed.centroid.longitude).abs() < 1e-12);
    }
}
