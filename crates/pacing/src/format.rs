//! Display helpers shared by the pipeline and its callers.

use crate::markers::PRIORITY_WHOLE_UNIT;
use crate::models::EnhancedSplit;
use crate::units::DistanceUnit;

/// Label of the synthetic marker appended at the race distance.
pub const FINISH_LABEL: &str = "Finish";

/// Rounds a distance to the two-decimal precision shown in distance labels.
///
/// Terrain lookups use this value rather than the raw distance so that the
/// numbers a runner sees in the table are the numbers the grades were
/// computed from.
pub fn display_distance(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}

/// Formats a distance like "13.10 mi".
pub fn format_distance_label(distance: f64, unit: DistanceUnit) -> String {
    format!("{distance:.2} {unit}")
}

/// Formats seconds as `H:MM:SS`, or `M:SS` under one hour.
///
/// Negative and non-finite values render as an em dash.
pub fn format_hms(total_seconds: f64) -> String {
    if !total_seconds.is_finite() || total_seconds < 0.0 {
        return "—".to_string();
    }
    let secs = total_seconds.round() as u64;
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;

    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Formats a pace as `M:SS/unit`.
pub fn format_pace(seconds_per_unit: f64, unit: DistanceUnit) -> String {
    format!("{}/{unit}", format_hms(seconds_per_unit))
}

/// The splits printed on a pace band: whole-unit markers and the finish.
pub fn primary_splits(splits: &[EnhancedSplit]) -> Vec<&EnhancedSplit> {
    splits
        .iter()
        .filter(|s| s.priority() == PRIORITY_WHOLE_UNIT || s.label() == FINISH_LABEL)
        .collect()
}
