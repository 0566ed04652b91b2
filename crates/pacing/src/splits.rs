//! The split pipeline: markers, timing, terrain, target paces.

use tracing::debug;

use crate::adjust::{apply_even_effort, apply_even_pace, apply_goal_time};
use crate::config::PacingConfig;
use crate::errors::PacingResult;
use crate::markers::{build_split_markers, deduplicate_markers};
use crate::models::{EnhancedSplit, PacingStrategy, SplitRequest};
use crate::terrain::add_elevation_data;
use crate::timing::calculate_split_times;

/// Builds the annotated splits for a race with the default [`PacingConfig`].
///
/// Returns an error instead of a partial list when the distance or pace is
/// missing, non-finite or not positive.
pub fn build_splits(request: &SplitRequest) -> PacingResult<Vec<EnhancedSplit>> {
    build_splits_with_config(request, &PacingConfig::default())
}

/// Builds the annotated splits for a race.
pub fn build_splits_with_config(
    request: &SplitRequest,
    config: &PacingConfig,
) -> PacingResult<Vec<EnhancedSplit>> {
    let flat_pace = request.validate()?;

    let markers = deduplicate_markers(build_split_markers(
        request.total_distance,
        request.distance_unit,
    ));
    let rows = calculate_split_times(
        &markers,
        request.total_distance,
        request.distance_unit,
        request.pace_unit,
        flat_pace,
    );

    let Some(profile) = &request.profile else {
        debug!("no elevation profile, splits keep the flat pace");
        return Ok(rows
            .into_iter()
            .map(|row| EnhancedSplit {
                row,
                elevation: None,
                grade: None,
                grade_range: None,
                target_pace: flat_pace,
            })
            .collect());
    };

    let terrain = add_elevation_data(rows, profile, request.distance_unit);

    let splits = match (request.strategy, request.goal_time_mode) {
        (PacingStrategy::EvenEffort, true) => {
            let goal_seconds = request.distance_in_pace_unit() * flat_pace;
            apply_goal_time(terrain, flat_pace, request.pace_unit, goal_seconds, config)
        }
        (PacingStrategy::EvenEffort, false) => apply_even_effort(terrain, flat_pace, config),
        (PacingStrategy::EvenPace, _) => apply_even_pace(terrain, flat_pace, config),
    };

    Ok(splits)
}
