//! Race split generation with elevation-aware pace targets.
//!
//! Given a race distance, a flat pace and optionally an elevation profile,
//! [`build_splits`] produces one row per interesting distance marker (whole
//! miles or kilometres, every 5K, halfway and the finish) with cumulative and
//! segment times, local grade and a target pace derived from the metabolic
//! cost of running on that grade.
//!
//! ```rust
//! use pacing::prelude::*;
//!
//! let profile = ElevationProfile::from_pairs(&[(0.0, 0.0), (13.1, 500.0)])?;
//! let request = SplitRequest::from_pace(13.1, DistanceUnit::Mi, 450.0, DistanceUnit::Mi)
//!     .with_profile(profile)
//!     .with_strategy(PacingStrategy::EvenPace);
//!
//! let splits = build_splits(&request)?;
//! assert_eq!(splits.last().unwrap().label(), "Finish");
//! # Ok::<(), pacing::errors::PacingError>(())
//! ```
//!
//! Every function here is pure: no I/O, no shared state.

pub mod adjust;
pub mod config;
pub mod elevation;
pub mod errors;
pub mod format;
pub mod markers;
pub mod metabolic;
pub mod models;
pub mod splits;
pub mod terrain;
pub mod timing;
pub mod units;

pub use splits::{build_splits, build_splits_with_config};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::PacingConfig;
    pub use crate::elevation::ProfileSummary;
    pub use crate::errors::{PacingError, PacingResult};
    pub use crate::format::{format_hms, format_pace, primary_splits};
    pub use crate::models::{
        ElevationPoint, ElevationProfile, EnhancedSplit, GradeStats, PacingStrategy, SplitRequest,
    };
    pub use crate::units::DistanceUnit;
    pub use crate::{build_splits, build_splits_with_config};
}
