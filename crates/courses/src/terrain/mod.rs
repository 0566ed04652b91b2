//! Procedural course profiles.
//!
//! Used to try pacing plans on synthetic terrain when no GPX file or preset
//! is at hand.

mod elevation;

pub use elevation::{ProfileGenerator, random_walk};
