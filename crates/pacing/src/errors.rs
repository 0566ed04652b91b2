use thiserror::Error;

/// Reasons the split pipeline refuses to produce a result.
///
/// None of these are fatal: callers are expected to surface them to the user
/// (e.g. "enter a valid pace") and try again with corrected input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PacingError {
    #[error("Invalid distance: {0} (must be finite and greater than zero)")]
    InvalidDistance(f64),

    #[error("No pace supplied")]
    MissingPace,

    #[error("Invalid pace: {0} seconds per unit (must be finite and greater than zero)")]
    InvalidPace(f64),

    #[error("Invalid goal time: {0} seconds (must be finite and greater than zero)")]
    InvalidGoalTime(f64),

    #[error("Invalid elevation profile: {0}")]
    InvalidProfile(String),
}

pub type PacingResult<T> = Result<T, PacingError>;
