//! Target pace selection from terrain.
//!
//! Three modes are supported:
//! - even pace: the target is the grade-adjusted pace of the flat pace,
//! - even effort: the target is the actual pace that holds flat-pace effort,
//!   slower uphill and faster downhill,
//! - even effort toward a goal time: effort-weighted paces rescaled so the
//!   splits add up exactly to the goal.

use tracing::{debug, warn};

use crate::config::PacingConfig;
use crate::metabolic::{adjustment_factor_with_threshold, minetti_cost};
use crate::models::EnhancedSplit;
use crate::terrain::TerrainSplit;
use crate::units::{DistanceUnit, convert_distance};

/// Grade-adjusted pace for every split; split times stay at the flat pace.
pub fn apply_even_pace(
    splits: Vec<TerrainSplit>,
    flat_pace: f64,
    config: &PacingConfig,
) -> Vec<EnhancedSplit> {
    splits
        .into_iter()
        .map(|split| {
            let factor = adjustment_factor_with_threshold(
                split.grade_range.weighted_avg,
                config.flat_grade_threshold,
            );
            split.with_target(flat_pace * factor)
        })
        .collect()
}

/// Effort-equivalent actual pace for every split; split times stay at the flat pace.
///
/// Holding flat-ground effort means running each segment at the flat pace
/// scaled by its relative metabolic cost, so climbs are slower than flat.
pub fn apply_even_effort(
    splits: Vec<TerrainSplit>,
    flat_pace: f64,
    config: &PacingConfig,
) -> Vec<EnhancedSplit> {
    splits
        .into_iter()
        .map(|split| {
            let factor = adjustment_factor_with_threshold(
                split.grade_range.weighted_avg,
                config.flat_grade_threshold,
            );
            split.with_target(flat_pace * factor)
        })
        .collect()
}

/// Even-effort paces that finish exactly on `goal_seconds`.
///
/// First each segment gets a natural pace from its metabolic cost relative to
/// the distance-weighted race average, mapped affinely so an average segment
/// sits at the flat pace and the spread is set by the configured variation.
/// Then all natural paces are divided by one global
/// factor (natural total / goal) so split times are re-accumulated to end on
/// the goal while keeping the relative effort distribution.
///
/// If the course has no measurable length or cost, every split keeps the flat
/// pace and its flat time.
pub fn apply_goal_time(
    splits: Vec<TerrainSplit>,
    flat_pace: f64,
    pace_unit: DistanceUnit,
    goal_seconds: f64,
    config: &PacingConfig,
) -> Vec<EnhancedSplit> {
    let mut total_weight = 0.0;
    let mut total_miles = 0.0;
    let costs: Vec<f64> = splits
        .iter()
        .map(|split| {
            let miles = split.segment_miles();
            if miles <= 0.0 {
                return 1.0;
            }
            let cost = minetti_cost(split.grade_range.weighted_avg / 100.0);
            total_weight += miles * cost;
            total_miles += miles;
            cost
        })
        .collect();

    let usable = total_weight.is_finite()
        && total_weight > 0.0
        && total_miles.is_finite()
        && total_miles > 0.0;
    if !usable {
        warn!(
            total_weight,
            total_miles, "no usable metabolic weight, keeping flat pace for every split"
        );
        return keep_flat(splits, flat_pace);
    }

    let average_cost = total_weight / total_miles;
    let band = config.variation_band();

    // Pass 1: natural paces and the total time they imply.
    let mut natural_total = 0.0;
    let natural: Vec<(f64, f64)> = splits
        .iter()
        .zip(&costs)
        .map(|(split, &cost)| {
            let miles = split.segment_miles();
            if miles > 0.0 {
                let effort_ratio = cost / average_cost;
                // costs are positive, so this floor only guards the pace sign
                let factor = ((1.0 - band) + effort_ratio * 2.0 * band).max(1.0 - band);
                let pace = flat_pace * factor;
                let distance = convert_distance(pace_unit, miles, DistanceUnit::Mi);
                natural_total += pace * distance;
                (pace, distance)
            } else {
                natural_total += split.row.segment_seconds;
                (flat_pace, 0.0)
            }
        })
        .collect();

    // Pass 2: one scale for the whole race.
    let scale = natural_total / goal_seconds;
    if !scale.is_finite() || scale <= 0.0 {
        warn!(natural_total, goal_seconds, "cannot rescale to goal time, keeping flat pace");
        return keep_flat(splits, flat_pace);
    }
    debug!(average_cost, natural_total, scale, "rescaling natural paces to goal time");

    let mut cumulative = 0.0;
    splits
        .into_iter()
        .zip(natural)
        .map(|(split, (natural_pace, distance))| {
            let (target_pace, segment_seconds) = if distance > 0.0 {
                let pace = natural_pace / scale;
                (pace, pace * distance)
            } else {
                (flat_pace, split.row.segment_seconds / scale)
            };
            cumulative += segment_seconds;

            let mut enhanced = split.with_target(target_pace);
            enhanced.row.segment_seconds = segment_seconds;
            enhanced.row.cumulative_seconds = cumulative;
            enhanced
        })
        .collect()
}

fn keep_flat(splits: Vec<TerrainSplit>, flat_pace: f64) -> Vec<EnhancedSplit> {
    splits
        .into_iter()
        .map(|split| split.with_target(flat_pace))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GradeStats, SplitRow};

    fn split(prev: f64, at: f64, grade: f64, pace: f64) -> TerrainSplit {
        TerrainSplit {
            row: SplitRow {
                label: format!("Mile {at}"),
                distance: at,
                distance_label: format!("{at:.2} mi"),
                cumulative_seconds: at * pace,
                segment_seconds: (at - prev) * pace,
                priority: 2,
            },
            elevation: 0.0,
            grade,
            grade_range: GradeStats::uniform(grade),
            distance_mi: at,
            prev_distance_mi: prev,
        }
    }

    fn course(grades: &[f64], pace: f64) -> Vec<TerrainSplit> {
        grades
            .iter()
            .enumerate()
            .map(|(i, &g)| split(i as f64, (i + 1) as f64, g, pace))
            .collect()
    }

    #[test]
    fn test_even_pace_uphill_slower_gap() {
        let out = apply_even_pace(
            course(&[0.0, 3.0, -3.0], 450.0),
            450.0,
            &PacingConfig::default(),
        );
        assert_eq!(out[0].target_pace, 450.0);
        assert!(out[1].target_pace > 450.0);
        assert!(out[2].target_pace < 450.0);
        // times are untouched
        assert_eq!(out[1].segment_seconds(), 450.0);
    }

    #[test]
    fn test_even_effort_slower_uphill() {
        let effort = apply_even_effort(
            course(&[0.0, 0.7, 3.0, -3.0], 450.0),
            450.0,
            &PacingConfig::default(),
        );
        assert_eq!(effort[0].target_pace, 450.0);
        assert!(effort[1].target_pace > 450.0);
        assert!(effort[2].target_pace > effort[1].target_pace);
        assert!(effort[3].target_pace < 450.0);
        // split times stay at the flat pace
        assert!(effort.iter().all(|s| s.segment_seconds() == 450.0));
    }

    #[test]
    fn test_goal_time_hits_total() {
        let pace = 450.0;
        let grades = [0.0, 2.5, 6.0, -4.0, -1.0, 0.3, 10.0, -12.0];
        let goal = grades.len() as f64 * pace;
        let out = apply_goal_time(
            course(&grades, pace),
            pace,
            DistanceUnit::Mi,
            goal,
            &PacingConfig::default(),
        );

        let total: f64 = out.iter().map(|s| s.segment_seconds()).sum();
        assert!((total - goal).abs() < 1e-6);
        assert!((out.last().unwrap().cumulative_seconds() - goal).abs() < 1e-6);
    }

    #[test]
    fn test_goal_time_preserves_effort_order() {
        let pace = 420.0;
        let out = apply_goal_time(
            course(&[0.0, 4.0, -4.0], pace),
            pace,
            DistanceUnit::Mi,
            3.0 * pace,
            &PacingConfig::default(),
        );
        assert!(out[1].target_pace > out[0].target_pace);
        assert!(out[2].target_pace < out[0].target_pace);
    }

    #[test]
    fn test_goal_time_orders_paces_by_grade() {
        let pace = 450.0;
        // flat, 1% climb, 6% climb, 3% descent
        let grades = [0.0, 1.0, 6.0, -3.0];
        let goal = 2700.0;
        let out = apply_goal_time(
            course(&grades, pace),
            pace,
            DistanceUnit::Mi,
            goal,
            &PacingConfig::default(),
        );

        let (flat, gentle, steep, descent) = (
            out[0].target_pace,
            out[1].target_pace,
            out[2].target_pace,
            out[3].target_pace,
        );
        assert!(descent < flat, "descent {descent} vs flat {flat}");
        assert!(flat < gentle, "flat {flat} vs 1% {gentle}");
        assert!(gentle < steep, "1% {gentle} vs 6% {steep}");

        let total: f64 = out.iter().map(|s| s.segment_seconds()).sum();
        assert!((total - goal).abs() < 1e-6);
    }

    #[test]
    fn test_goal_time_variation_sets_spread() {
        let pace = 400.0;
        let spread = |variation: f64| {
            let config = PacingConfig::default().with_natural_variation(variation);
            let out = apply_goal_time(
                course(&[0.0, 8.0], pace),
                pace,
                DistanceUnit::Mi,
                2.0 * pace,
                &config,
            );
            out[1].target_pace / out[0].target_pace
        };
        assert!(spread(0.1) > 1.0);
        assert!(spread(0.3) > spread(0.1));
        assert!((spread(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_goal_time_flat_course_is_flat() {
        let pace = 360.0;
        let out = apply_goal_time(
            course(&[0.0; 5], pace),
            pace,
            DistanceUnit::Mi,
            5.0 * pace,
            &PacingConfig::default(),
        );
        for s in &out {
            assert!((s.target_pace - pace).abs() < 1e-9);
            assert!((s.segment_seconds() - pace).abs() < 1e-9);
        }
    }

    #[test]
    fn test_goal_time_km_pace_unit() {
        let pace_per_km = 280.0;
        let miles = 3.0;
        let goal = miles * 1.609344 * pace_per_km;
        let out = apply_goal_time(
            course(&[1.0, 2.0, -3.0], 0.0),
            pace_per_km,
            DistanceUnit::Km,
            goal,
            &PacingConfig::default(),
        );
        let total: f64 = out.iter().map(|s| s.segment_seconds()).sum();
        assert!((total - goal).abs() < 1e-6);
    }

    #[test]
    fn test_goal_time_degenerate_falls_back() {
        // zero-length segments only
        let splits = vec![split(0.0, 0.0, 5.0, 400.0)];
        let out = apply_goal_time(splits, 400.0, DistanceUnit::Mi, 100.0, &PacingConfig::default());
        assert_eq!(out[0].target_pace, 400.0);
        assert_eq!(out[0].segment_seconds(), 0.0);
    }
}
