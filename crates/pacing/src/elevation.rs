//! Sampling an elevation profile at points and over segments.
//!
//! All distances here are in miles, the native unit of profiles, and all
//! elevations in feet. Grades are returned in percent.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::{ElevationPoint, ElevationProfile, GradeStats};
use crate::units::FEET_PER_MILE;

/// Grade in percent between two profile points.
///
/// Zero-length or reversed runs have no meaningful grade and report 0.
pub fn grade_between(a: &ElevationPoint, b: &ElevationPoint) -> f64 {
    let run_feet = (b.distance - a.distance) * FEET_PER_MILE;
    if run_feet <= 0.0 {
        return 0.0;
    }
    (b.elevation - a.elevation) / run_feet * 100.0
}

/// Elevation at `distance`, linearly interpolated and clamped to the profile ends.
pub fn elevation_at(profile: &ElevationProfile, distance: f64) -> f64 {
    let first = profile.first();
    let last = profile.last();
    if distance <= first.distance {
        return first.elevation;
    }
    if distance >= last.distance {
        return last.elevation;
    }

    // first.distance < distance < last.distance, so 1 <= hi <= len - 1 and the
    // bracket [lo, hi] has a strictly positive span.
    let points = profile.points();
    let hi = points.partition_point(|p| p.distance < distance);
    let (p1, p2) = (points[hi - 1], points[hi]);
    let ratio = (distance - p1.distance) / (p2.distance - p1.distance);
    p1.elevation + (p2.elevation - p1.elevation) * ratio
}

/// End-to-end grade over `[start, end]` from interpolated elevations.
pub fn average_grade(profile: &ElevationProfile, start: f64, end: f64) -> f64 {
    if start >= end {
        return 0.0;
    }
    let rise = elevation_at(profile, end) - elevation_at(profile, start);
    let run_feet = (end - start) * FEET_PER_MILE;
    if run_feet > 0.0 { rise / run_feet * 100.0 } else { 0.0 }
}

/// Distance-weighted grade statistics over `[start, end]`.
///
/// Uses every profile point inside the segment. With fewer than two such
/// points the segment is too coarse to sub-divide and the end-to-end
/// [`average_grade`] is reported for all three statistics.
pub fn grade_stats(profile: &ElevationProfile, start: f64, end: f64) -> GradeStats {
    let relevant: Vec<&ElevationPoint> = profile
        .points()
        .iter()
        .filter(|p| p.distance >= start && p.distance <= end)
        .collect();

    if relevant.len() < 2 {
        trace!(start, end, "fewer than two profile points in segment, using end-to-end grade");
        return GradeStats::uniform(average_grade(profile, start, end));
    }

    let mut weighted = 0.0;
    let mut run = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for pair in relevant.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = b.distance - a.distance;
        let grade = grade_between(a, b);

        weighted += grade * length;
        run += length;
        min = min.min(grade);
        max = max.max(grade);
    }

    GradeStats {
        weighted_avg: if run > 0.0 { weighted / run } else { 0.0 },
        min,
        max,
    }
}

/// Totals describing a whole course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Course length covered by the profile, in miles.
    pub distance: f64,
    /// Total ascent in feet.
    pub gain: f64,
    /// Total descent in feet, as a positive number.
    pub loss: f64,
    pub min_elevation: f64,
    pub max_elevation: f64,
}

impl ElevationProfile {
    pub fn elevation_at(&self, distance: f64) -> f64 {
        elevation_at(self, distance)
    }

    pub fn grade_stats(&self, start: f64, end: f64) -> GradeStats {
        grade_stats(self, start, end)
    }

    pub fn summary(&self) -> ProfileSummary {
        let points = self.points();
        let mut gain = 0.0;
        let mut loss = 0.0;
        for pair in points.windows(2) {
            let diff = pair[1].elevation - pair[0].elevation;
            if diff > 0.0 {
                gain += diff;
            } else {
                loss -= diff;
            }
        }

        let (min_elevation, max_elevation) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.elevation), hi.max(p.elevation))
            });

        ProfileSummary {
            distance: self.last().distance - self.first().distance,
            gain,
            loss,
            min_elevation,
            max_elevation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(pairs: &[(f64, f64)]) -> ElevationProfile {
        ElevationProfile::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_elevation_clamps() {
        let p = profile(&[(0.0, 100.0), (1.0, 200.0)]);
        assert_eq!(elevation_at(&p, -5.0), 100.0);
        assert_eq!(elevation_at(&p, 10.0), 200.0);
    }

    #[test]
    fn test_elevation_interpolates() {
        let p = profile(&[(0.0, 100.0), (1.0, 200.0), (3.0, 0.0)]);
        assert!((elevation_at(&p, 0.25) - 125.0).abs() < 1e-9);
        assert!((elevation_at(&p, 2.0) - 100.0).abs() < 1e-9);
        assert_eq!(elevation_at(&p, 1.0), 200.0);
    }

    #[test]
    fn test_elevation_duplicate_distance() {
        let p = profile(&[(0.0, 0.0), (1.0, 10.0), (1.0, 50.0), (2.0, 50.0)]);
        assert_eq!(elevation_at(&p, 1.0), 10.0);
        assert!(elevation_at(&p, 1.5).is_finite());
        assert!((elevation_at(&p, 1.5) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_grade_between() {
        let a = ElevationPoint::new(0.0, 0.0);
        let b = ElevationPoint::new(1.0, 52.8);
        assert!((grade_between(&a, &b) - 1.0).abs() < 1e-9);
        assert_eq!(grade_between(&b, &a), 0.0);
        assert_eq!(grade_between(&a, &a), 0.0);
    }

    #[test]
    fn test_weighted_average() {
        // 1 mile at +1%, then 3 miles at -1%
        let p = profile(&[(0.0, 0.0), (1.0, 52.8), (4.0, 52.8 - 158.4)]);
        let stats = grade_stats(&p, 0.0, 4.0);
        assert!((stats.weighted_avg - (-0.5)).abs() < 1e-9);
        assert!((stats.min - (-1.0)).abs() < 1e-9);
        assert!((stats.max - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_with_sparse_points() {
        let p = profile(&[(0.0, 0.0), (10.0, 528.0)]);
        // No profile points inside (2, 3): end-to-end grade of the interpolated line.
        let stats = grade_stats(&p, 2.0, 3.0);
        assert!((stats.weighted_avg - 1.0).abs() < 1e-9);
        assert_eq!(stats.min, stats.max);
        assert_eq!(stats.min, stats.weighted_avg);
    }

    #[test]
    fn test_empty_segment_is_flat() {
        let p = profile(&[(0.0, 0.0), (1.0, 100.0)]);
        assert_eq!(grade_stats(&p, 0.5, 0.5), GradeStats::FLAT);
        assert_eq!(average_grade(&p, 0.8, 0.2), 0.0);
    }

    #[test]
    fn test_flat_profile() {
        let p = profile(&[(0.0, 300.0), (5.0, 300.0), (13.1, 300.0)]);
        for (s, e) in [(0.0, 1.0), (0.0, 13.1), (4.5, 5.5)] {
            assert_eq!(grade_stats(&p, s, e).weighted_avg, 0.0);
        }
    }

    #[test]
    fn test_summary() {
        let p = profile(&[(0.0, 100.0), (1.0, 150.0), (2.0, 120.0), (3.0, 180.0)]);
        let summary = p.summary();
        assert_eq!(summary.distance, 3.0);
        assert_eq!(summary.gain, 110.0);
        assert_eq!(summary.loss, 30.0);
        assert_eq!(summary.min_elevation, 100.0);
        assert_eq!(summary.max_elevation, 180.0);
    }
}
