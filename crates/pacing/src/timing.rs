//! Flat-pace timing of split markers.

use tracing::debug;

use crate::format::{FINISH_LABEL, format_distance_label};
use crate::markers::{MERGE_RESOLUTION, PRIORITY_FINISH};
use crate::models::{SplitMarker, SplitRow};
use crate::units::{DistanceUnit, convert_distance};

/// Times each marker at a flat pace and closes the list with a finish row.
///
/// `markers` must already be de-duplicated and sorted. A "Finish" row is
/// appended whenever the last marker is more than [`MERGE_RESOLUTION`] away
/// from `total_distance`, so the final row always carries the full race time.
pub fn calculate_split_times(
    markers: &[SplitMarker],
    total_distance: f64,
    distance_unit: DistanceUnit,
    pace_unit: DistanceUnit,
    pace_seconds_per_unit: f64,
) -> Vec<SplitRow> {
    let mut rows = Vec::with_capacity(markers.len() + 1);
    let mut prev_in_pace_unit = 0.0;

    for marker in markers {
        let in_pace_unit = convert_distance(pace_unit, marker.distance, distance_unit);
        let segment = (in_pace_unit - prev_in_pace_unit).max(0.0);

        rows.push(SplitRow {
            label: marker.label.clone(),
            distance: marker.distance,
            distance_label: format_distance_label(marker.distance, distance_unit),
            cumulative_seconds: in_pace_unit * pace_seconds_per_unit,
            segment_seconds: segment * pace_seconds_per_unit,
            priority: marker.priority,
        });

        prev_in_pace_unit = in_pace_unit;
    }

    let last_distance = markers.last().map_or(0.0, |m| m.distance);
    if (last_distance - total_distance).abs() > MERGE_RESOLUTION {
        let total_in_pace_unit = convert_distance(pace_unit, total_distance, distance_unit);
        let segment = (total_in_pace_unit - prev_in_pace_unit).max(0.0);

        rows.push(SplitRow {
            label: FINISH_LABEL.to_string(),
            distance: total_distance,
            distance_label: format_distance_label(total_distance, distance_unit),
            cumulative_seconds: total_in_pace_unit * pace_seconds_per_unit,
            segment_seconds: segment * pace_seconds_per_unit,
            priority: PRIORITY_FINISH,
        });
    }

    debug!(rows = rows.len(), "timed splits at {pace_seconds_per_unit:.1}s/{pace_unit}");
    rows
}
