//! Distance marker generation and de-duplication.

use std::collections::HashMap;

use tracing::debug;

use crate::models::SplitMarker;
use crate::units::{DistanceUnit, convert_distance};

pub const PRIORITY_HALFWAY: u8 = 0;
pub const PRIORITY_FIVE_K: u8 = 1;
pub const PRIORITY_WHOLE_UNIT: u8 = 2;
pub const PRIORITY_FINISH: u8 = 3;

/// Tolerance against floor errors when counting whole units and 5K multiples.
const COUNT_EPS: f64 = 1e-6;

/// Resolution at which two markers are considered the same place.
pub const MERGE_RESOLUTION: f64 = 1e-4;

/// Produces every whole-unit, 5K and halfway marker for a race, unordered.
pub fn build_split_markers(total_distance: f64, distance_unit: DistanceUnit) -> Vec<SplitMarker> {
    let mut markers = Vec::new();

    let whole_max = (total_distance + COUNT_EPS).floor().max(0.0) as u32;
    for i in 1..=whole_max {
        let label = match distance_unit {
            DistanceUnit::Mi => format!("Mile {i}"),
            DistanceUnit::Km => format!("{i} km"),
        };
        markers.push(SplitMarker {
            label,
            distance: f64::from(i),
            priority: PRIORITY_WHOLE_UNIT,
        });
    }

    // 5K multiples are counted in km, then placed in the caller's unit.
    let total_km = convert_distance(DistanceUnit::Km, total_distance, distance_unit);
    let five_k_count = (total_km / 5.0 + COUNT_EPS).floor().max(0.0) as u32;
    for k in 1..=five_k_count {
        let km_at_mark = k * 5;
        markers.push(SplitMarker {
            label: format!("{km_at_mark}K"),
            distance: convert_distance(distance_unit, f64::from(km_at_mark), DistanceUnit::Km),
            priority: PRIORITY_FIVE_K,
        });
    }

    markers.push(SplitMarker {
        label: "Halfway".to_string(),
        distance: total_distance / 2.0,
        priority: PRIORITY_HALFWAY,
    });

    debug!(
        whole = whole_max,
        five_k = five_k_count,
        "built {} split markers",
        markers.len()
    );

    markers
}

/// Merges markers that land on the same place and sorts the survivors by distance.
///
/// Markers whose distances round to the same multiple of [`MERGE_RESOLUTION`]
/// collapse to the one with the lowest priority value; ties keep the first seen.
pub fn deduplicate_markers(markers: Vec<SplitMarker>) -> Vec<SplitMarker> {
    let before = markers.len();
    let mut by_key: HashMap<i64, SplitMarker> = HashMap::with_capacity(before);

    for marker in markers {
        let key = (marker.distance / MERGE_RESOLUTION).round() as i64;
        match by_key.get(&key) {
            Some(existing) if existing.priority <= marker.priority => {}
            _ => {
                by_key.insert(key, marker);
            }
        }
    }

    let mut deduped: Vec<SplitMarker> = by_key.into_values().collect();
    deduped.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    debug!("deduplicated {before} markers to {}", deduped.len());
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(markers: &[SplitMarker]) -> Vec<&str> {
        markers.iter().map(|m| m.label.as_str()).collect()
    }

    #[test]
    fn test_marathon_markers() {
        let markers = build_split_markers(26.2, DistanceUnit::Mi);
        let whole = markers.iter().filter(|m| m.priority == PRIORITY_WHOLE_UNIT).count();
        let five_k = markers.iter().filter(|m| m.priority == PRIORITY_FIVE_K).count();
        assert_eq!(whole, 26);
        // 26.2 mi = 42.16 km -> 5K..40K
        assert_eq!(five_k, 8);
        assert_eq!(markers.iter().filter(|m| m.label == "Halfway").count(), 1);
    }

    #[test]
    fn test_five_k_converted_to_caller_unit() {
        let markers = build_split_markers(26.2, DistanceUnit::Mi);
        let ten_k = markers.iter().find(|m| m.label == "10K").unwrap();
        assert!((ten_k.distance - 6.213712).abs() < 1e-6);
    }

    #[test]
    fn test_km_labels() {
        let markers = build_split_markers(10.0, DistanceUnit::Km);
        let l = labels(&markers);
        assert!(l.contains(&"1 km"));
        assert!(l.contains(&"10 km"));
        assert!(l.contains(&"5K"));
        assert!(l.contains(&"10K"));
    }

    #[test]
    fn test_floor_tolerance() {
        // 3.1068559... miles is exactly 5 km but floats may land just under.
        let five_k_in_miles = convert_distance(DistanceUnit::Mi, 5.0, DistanceUnit::Km);
        let markers = build_split_markers(five_k_in_miles, DistanceUnit::Mi);
        assert!(labels(&markers).contains(&"5K"));
    }

    #[test]
    fn test_short_race_only_halfway() {
        let markers = build_split_markers(0.5, DistanceUnit::Mi);
        assert_eq!(labels(&markers), vec!["Halfway"]);
        assert!((markers[0].distance - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_dedup_priority() {
        // 10 km race: "5 km", "5K" and "Halfway" all sit at 5.0
        let markers = deduplicate_markers(build_split_markers(10.0, DistanceUnit::Km));
        let at_five: Vec<_> = markers
            .iter()
            .filter(|m| (m.distance - 5.0).abs() < 1e-9)
            .collect();
        assert_eq!(at_five.len(), 1);
        assert_eq!(at_five[0].label, "Halfway");

        let at_ten = markers.iter().find(|m| (m.distance - 10.0).abs() < 1e-9).unwrap();
        assert_eq!(at_ten.label, "10K");
    }

    #[test]
    fn test_dedup_sorted_and_spaced() {
        for total in [1.0, 3.1, 6.2, 13.1, 26.2, 42.195, 50.0] {
            for unit in [DistanceUnit::Mi, DistanceUnit::Km] {
                let markers = deduplicate_markers(build_split_markers(total, unit));
                for pair in markers.windows(2) {
                    assert!(pair[0].distance < pair[1].distance);
                    assert!(pair[1].distance - pair[0].distance >= MERGE_RESOLUTION);
                }
            }
        }
    }

    #[test]
    fn test_dedup_keeps_first_on_tie() {
        let markers = vec![
            SplitMarker {
                label: "A".into(),
                distance: 1.0,
                priority: 2,
            },
            SplitMarker {
                label: "B".into(),
                distance: 1.00001,
                priority: 2,
            },
        ];
        let out = deduplicate_markers(markers);
        assert_eq!(labels(&out), vec!["A"]);
    }
}
