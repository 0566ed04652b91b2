//! Attaches elevation and grade data to timed splits.

use crate::elevation::{elevation_at, grade_stats};
use crate::format::display_distance;
use crate::models::{ElevationProfile, EnhancedSplit, GradeStats, SplitRow};
use crate::units::{DistanceUnit, to_miles};

/// A timed split annotated with terrain, before a target pace is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSplit {
    pub row: SplitRow,
    /// Elevation at the marker, rounded to the nearest foot.
    pub elevation: f64,
    /// Segment weighted grade, rounded to one decimal.
    pub grade: f64,
    /// Unrounded segment statistics; pacing works from these.
    pub grade_range: GradeStats,
    /// Marker position in miles, at display precision.
    pub distance_mi: f64,
    /// Previous marker position in miles (0 for the first split).
    pub prev_distance_mi: f64,
}

impl TerrainSplit {
    /// Segment length in miles.
    pub fn segment_miles(&self) -> f64 {
        self.distance_mi - self.prev_distance_mi
    }

    pub fn with_target(self, target_pace: f64) -> EnhancedSplit {
        EnhancedSplit {
            row: self.row,
            elevation: Some(self.elevation),
            grade: Some(self.grade),
            grade_range: Some(self.grade_range),
            target_pace,
        }
    }
}

/// Samples `profile` for every split.
///
/// Split positions are taken at the two-decimal precision of their labels and
/// converted to miles before sampling; each split's grade covers the segment
/// from the previous split (or the start) up to itself.
pub fn add_elevation_data(
    rows: Vec<SplitRow>,
    profile: &ElevationProfile,
    distance_unit: DistanceUnit,
) -> Vec<TerrainSplit> {
    let mut prev_distance_mi = 0.0;

    rows.into_iter()
        .map(|row| {
            let distance_mi = to_miles(display_distance(row.distance), distance_unit);
            let stats = grade_stats(profile, prev_distance_mi, distance_mi);

            let split = TerrainSplit {
                elevation: elevation_at(profile, distance_mi).round(),
                grade: (stats.weighted_avg * 10.0).round() / 10.0,
                grade_range: stats,
                distance_mi,
                prev_distance_mi,
                row,
            };
            prev_distance_mi = distance_mi;
            split
        })
        .collect()
}
