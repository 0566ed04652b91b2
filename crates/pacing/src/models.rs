use serde::{Deserialize, Serialize};

use crate::errors::{PacingError, PacingResult};
use crate::units::{DistanceUnit, convert_distance};

/// A single sample of an elevation profile.
///
/// `distance` is in miles from the start, `elevation` in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationPoint {
    pub distance: f64,
    pub elevation: f64,
}

impl ElevationPoint {
    pub const fn new(distance: f64, elevation: f64) -> Self {
        Self {
            distance,
            elevation,
        }
    }
}

/// An ordered course profile: at least two points, ascending by distance.
///
/// The invariants are checked once on construction so the sampling code can
/// index the first and last points freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ElevationPoint>", into = "Vec<ElevationPoint>")]
pub struct ElevationProfile {
    points: Vec<ElevationPoint>,
}

impl ElevationProfile {
    pub fn new(points: Vec<ElevationPoint>) -> PacingResult<Self> {
        if points.len() < 2 {
            return Err(PacingError::InvalidProfile(format!(
                "needs at least 2 points, got {}",
                points.len()
            )));
        }

        for (i, p) in points.iter().enumerate() {
            if !p.distance.is_finite() || !p.elevation.is_finite() {
                return Err(PacingError::InvalidProfile(format!(
                    "point {i} is not finite"
                )));
            }
            if p.distance < 0.0 {
                return Err(PacingError::InvalidProfile(format!(
                    "point {i} has negative distance {}",
                    p.distance
                )));
            }
        }

        if let Some(i) = points
            .windows(2)
            .position(|w| w[1].distance < w[0].distance)
        {
            return Err(PacingError::InvalidProfile(format!(
                "distances decrease between points {i} and {}",
                i + 1
            )));
        }

        Ok(Self { points })
    }

    /// Builds a profile from `(distance_mi, elevation_ft)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> PacingResult<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(distance, elevation)| ElevationPoint::new(distance, elevation))
                .collect(),
        )
    }

    pub fn points(&self) -> &[ElevationPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> ElevationPoint {
        self.points[0]
    }

    pub fn last(&self) -> ElevationPoint {
        self.points[self.points.len() - 1]
    }
}

impl TryFrom<Vec<ElevationPoint>> for ElevationProfile {
    type Error = PacingError;

    fn try_from(points: Vec<ElevationPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<ElevationProfile> for Vec<ElevationPoint> {
    fn from(profile: ElevationProfile) -> Self {
        profile.points
    }
}

/// How target paces are derived from terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PacingStrategy {
    /// Constant actual pace; the reported target pace is the grade-adjusted pace.
    #[default]
    EvenPace,
    /// Constant effort; the reported target pace is the actual pace to run.
    EvenEffort,
}

impl std::str::FromStr for PacingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "even-pace" | "pace" => Ok(PacingStrategy::EvenPace),
            "even-effort" | "effort" => Ok(PacingStrategy::EvenEffort),
            other => Err(format!("unknown pacing strategy: {other}")),
        }
    }
}

impl std::fmt::Display for PacingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PacingStrategy::EvenPace => "even-pace",
            PacingStrategy::EvenEffort => "even-effort",
        })
    }
}

/// A labelled distance point before timing is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitMarker {
    pub label: String,
    /// Distance in the caller's distance unit.
    pub distance: f64,
    /// Lower wins when markers coincide.
    pub priority: u8,
}

/// A timed marker at the flat pace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRow {
    pub label: String,
    /// Raw distance in the caller's distance unit.
    pub distance: f64,
    /// Display form of `distance`, e.g. "13.10 mi".
    pub distance_label: String,
    pub cumulative_seconds: f64,
    pub segment_seconds: f64,
    pub priority: u8,
}

/// Grade statistics over a segment, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeStats {
    pub weighted_avg: f64,
    pub min: f64,
    pub max: f64,
}

impl GradeStats {
    pub const FLAT: GradeStats = GradeStats::uniform(0.0);

    pub const fn uniform(grade: f64) -> Self {
        Self {
            weighted_avg: grade,
            min: grade,
            max: grade,
        }
    }
}

/// A split with terrain data and a target pace.
///
/// `elevation`, `grade` and `grade_range` are `None` only when no elevation
/// profile was supplied. `target_pace` is always present: without a profile it
/// is the flat pace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedSplit {
    #[serde(flatten)]
    pub row: SplitRow,
    /// Elevation at the marker in feet, rounded to the nearest foot.
    pub elevation: Option<f64>,
    /// Segment average grade in percent, rounded to one decimal.
    pub grade: Option<f64>,
    pub grade_range: Option<GradeStats>,
    /// Seconds per pace unit.
    pub target_pace: f64,
}

impl EnhancedSplit {
    pub fn label(&self) -> &str {
        &self.row.label
    }

    pub fn distance(&self) -> f64 {
        self.row.distance
    }

    pub fn cumulative_seconds(&self) -> f64 {
        self.row.cumulative_seconds
    }

    pub fn segment_seconds(&self) -> f64 {
        self.row.segment_seconds
    }

    pub fn priority(&self) -> u8 {
        self.row.priority
    }
}

/// Everything the split pipeline needs for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub total_distance: f64,
    pub distance_unit: DistanceUnit,
    pub pace_unit: DistanceUnit,
    /// Flat pace in seconds per `pace_unit`.
    pub pace_seconds_per_unit: Option<f64>,
    #[serde(default)]
    pub profile: Option<ElevationProfile>,
    #[serde(default)]
    pub strategy: PacingStrategy,
    /// The pace was derived from a goal finish time rather than entered directly.
    #[serde(default)]
    pub goal_time_mode: bool,
}

impl SplitRequest {
    /// A request driven by a flat pace.
    pub fn from_pace(
        total_distance: f64,
        distance_unit: DistanceUnit,
        pace_seconds_per_unit: f64,
        pace_unit: DistanceUnit,
    ) -> Self {
        Self {
            total_distance,
            distance_unit,
            pace_unit,
            pace_seconds_per_unit: Some(pace_seconds_per_unit),
            profile: None,
            strategy: PacingStrategy::EvenPace,
            goal_time_mode: false,
        }
    }

    /// A request driven by a goal finish time; the flat pace is derived from it.
    pub fn from_goal_time(
        total_distance: f64,
        distance_unit: DistanceUnit,
        goal_seconds: f64,
        pace_unit: DistanceUnit,
    ) -> PacingResult<Self> {
        if !goal_seconds.is_finite() || goal_seconds <= 0.0 {
            return Err(PacingError::InvalidGoalTime(goal_seconds));
        }
        let distance_in_pace_unit = convert_distance(pace_unit, total_distance, distance_unit);
        if !distance_in_pace_unit.is_finite() || distance_in_pace_unit <= 0.0 {
            return Err(PacingError::InvalidDistance(total_distance));
        }

        Ok(Self {
            total_distance,
            distance_unit,
            pace_unit,
            pace_seconds_per_unit: Some(goal_seconds / distance_in_pace_unit),
            profile: None,
            strategy: PacingStrategy::EvenPace,
            goal_time_mode: true,
        })
    }

    pub fn with_profile(mut self, profile: ElevationProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_strategy(mut self, strategy: PacingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Total distance expressed in the pace unit.
    pub fn distance_in_pace_unit(&self) -> f64 {
        convert_distance(self.pace_unit, self.total_distance, self.distance_unit)
    }

    /// Finish time at the flat pace, which is also the goal time in goal-time mode.
    pub fn goal_seconds(&self) -> Option<f64> {
        self.pace_seconds_per_unit
            .map(|pace| self.distance_in_pace_unit() * pace)
    }

    /// Checks the request and returns the validated flat pace.
    pub fn validate(&self) -> PacingResult<f64> {
        if !self.total_distance.is_finite() || self.total_distance <= 0.0 {
            return Err(PacingError::InvalidDistance(self.total_distance));
        }
        let pace = self.pace_seconds_per_unit.ok_or(PacingError::MissingPace)?;
        if !pace.is_finite() || pace <= 0.0 {
            return Err(PacingError::InvalidPace(pace));
        }
        Ok(pace)
    }
}
