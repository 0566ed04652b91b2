//! Course sources and the command-line front end for race split planning.
//!
//! The pacing maths lives in the `pacing` crate; this crate supplies the
//! elevation profiles it consumes (built-in race presets, GPX tracks and
//! procedural terrain) and the parsing a user-facing tool needs.
//!
//! ```rust,no_run
//! use courses::prelude::*;
//!
//! let boston = courses::presets::find("boston-marathon")?;
//! let goal = parse_duration("3:10:00")?;
//! let request =
//!     SplitRequest::from_goal_time(boston.distance, boston.unit, goal, DistanceUnit::Mi)?
//!         .with_profile(boston.profile()?)
//!         .with_strategy(PacingStrategy::EvenEffort);
//! let splits = build_splits(&request)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod gpx_files;
pub mod input;
pub mod presets;
pub mod terrain;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{CliConfig, RunDefaults};
    pub use crate::gpx_files::{GpxProfileLoader, LoadedCourse};
    pub use crate::input::{parse_duration, parse_pace};
    pub use crate::presets::RacePreset;
    pub use crate::terrain::{ProfileGenerator, random_walk};
    pub use pacing::prelude::*;
}
