//! Built-in race courses with reference elevation profiles.
//!
//! Profiles are coarse (roughly one sample per mile, denser around bridges and
//! named hills), distances in miles and elevations in feet.

use pacing::errors::PacingResult;
use pacing::models::ElevationProfile;
use pacing::units::DistanceUnit;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Unknown race preset: {0}")]
    Unknown(String),
}

/// A named race course.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RacePreset {
    /// Stable identifier, e.g. "boston-marathon".
    pub id: &'static str,
    pub name: &'static str,
    pub distance: f64,
    pub unit: DistanceUnit,
    #[serde(skip)]
    points: &'static [(f64, f64)],
}

impl RacePreset {
    /// The course profile.
    pub fn profile(&self) -> PacingResult<ElevationProfile> {
        ElevationProfile::from_pairs(self.points)
    }
}

const fn marathon(
    id: &'static str,
    name: &'static str,
    points: &'static [(f64, f64)],
) -> RacePreset {
    RacePreset {
        id,
        name,
        distance: 26.2,
        unit: DistanceUnit::Mi,
        points,
    }
}

/// Presets in founding order.
pub const PRESETS: &[RacePreset] = &[
    marathon("boston-marathon", "Boston Marathon", BOSTON),
    RacePreset {
        id: "united-nyc-half",
        name: "United NYC Half Marathon",
        distance: 13.1,
        unit: DistanceUnit::Mi,
        points: UNITED_NYC_HALF,
    },
    marathon("nyc-marathon", "NYC Marathon", NYC),
    marathon("chicago-marathon", "Chicago Marathon", CHICAGO),
    marathon("london-marathon", "London Marathon", LONDON),
    marathon("berlin-marathon", "Berlin Marathon", BERLIN),
    marathon("sydney-marathon", "Sydney Marathon", SYDNEY),
    marathon("tokyo-marathon", "Tokyo Marathon", TOKYO),
];

pub fn all() -> &'static [RacePreset] {
    PRESETS
}

/// Looks a preset up by id, ignoring case.
pub fn find(id: &str) -> Result<&'static RacePreset, PresetError> {
    PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| PresetError::Unknown(id.to_string()))
}

/// Net downhill with the Newton hills and Heartbreak Hill late in the race.
#[rustfmt::skip]
const BOSTON: &[(f64, f64)] = &[
    (0.0, 490.0), (1.0, 450.0), (2.0, 400.0), (3.0, 350.0), (4.0, 320.0), (5.0, 290.0),
    (6.0, 260.0), (7.0, 270.0), (8.0, 280.0), (9.0, 290.0), (10.0, 300.0), (11.0, 320.0),
    (12.0, 340.0), (13.0, 360.0), (14.0, 380.0), (15.0, 400.0), (16.0, 450.0), (17.0, 480.0),
    (17.5, 500.0), (18.0, 520.0), (19.0, 540.0), (20.0, 560.0), (20.5, 580.0), (21.0, 560.0),
    (21.5, 540.0), (22.0, 480.0), (23.0, 420.0), (24.0, 360.0), (25.0, 300.0), (26.0, 150.0),
    (26.2, 30.0),
];

/// Brooklyn to Manhattan over the Brooklyn Bridge.
#[rustfmt::skip]
const UNITED_NYC_HALF: &[(f64, f64)] = &[
    (0.0, 85.0), (1.0, 80.0), (2.0, 75.0), (3.0, 65.0), (4.0, 55.0), (5.0, 45.0), (6.0, 35.0),
    (7.0, 125.0), (7.5, 135.0), (8.0, 130.0), (8.5, 45.0), (9.0, 35.0), (10.0, 30.0),
    (11.0, 25.0), (12.0, 20.0), (13.0, 15.0), (13.1, 112.0),
];

/// Five boroughs, bridge climbs at the Verrazzano and the Queensboro.
#[rustfmt::skip]
const NYC: &[(f64, f64)] = &[
    (0.0, 16.0), (0.5, 18.0), (1.0, 185.0), (1.5, 228.0), (2.0, 210.0), (2.5, 82.0),
    (3.0, 62.0), (4.0, 52.0), (5.0, 49.0), (6.0, 46.0), (7.0, 43.0), (8.0, 41.0), (9.0, 39.0),
    (10.0, 38.0), (11.0, 36.0), (12.0, 35.0), (13.0, 33.0), (14.0, 32.0), (15.0, 31.0),
    (15.5, 35.0), (16.0, 125.0), (16.5, 135.0), (17.0, 130.0), (17.5, 65.0), (18.0, 52.0),
    (19.0, 49.0), (20.0, 98.0), (20.5, 105.0), (21.0, 102.0), (21.5, 95.0), (22.0, 89.0),
    (23.0, 85.0), (24.0, 88.0), (25.0, 92.0), (26.0, 108.0), (26.2, 112.0),
];

/// Flat loop from Grant Park with about 30 ft of total relief.
#[rustfmt::skip]
const CHICAGO: &[(f64, f64)] = &[
    (0.0, 595.0), (1.0, 598.0), (2.0, 600.0), (3.0, 602.0), (4.0, 599.0), (5.0, 597.0),
    (6.0, 595.0), (7.0, 593.0), (8.0, 591.0), (9.0, 589.0), (10.0, 587.0), (11.0, 585.0),
    (12.0, 583.0), (13.0, 581.0), (14.0, 580.0), (15.0, 578.0), (16.0, 576.0), (17.0, 575.0),
    (18.0, 577.0), (19.0, 579.0), (20.0, 582.0), (21.0, 585.0), (22.0, 588.0), (23.0, 591.0),
    (24.0, 594.0), (25.0, 597.0), (26.0, 600.0), (26.2, 601.0),
];

/// Gentle descent from Greenwich to the Thames.
#[rustfmt::skip]
const LONDON: &[(f64, f64)] = &[
    (0.0, 130.0), (1.0, 125.0), (2.0, 120.0), (3.0, 115.0), (4.0, 110.0), (5.0, 105.0),
    (6.0, 100.0), (7.0, 95.0), (8.0, 90.0), (9.0, 85.0), (10.0, 80.0), (11.0, 75.0),
    (12.0, 70.0), (13.0, 65.0), (14.0, 60.0), (15.0, 55.0), (16.0, 50.0), (17.0, 45.0),
    (18.0, 40.0), (19.0, 35.0), (20.0, 30.0), (21.0, 25.0), (22.0, 20.0), (23.0, 25.0),
    (24.0, 30.0), (25.0, 35.0), (26.0, 40.0), (26.2, 45.0),
];

/// Very flat, the record-setting course.
#[rustfmt::skip]
const BERLIN: &[(f64, f64)] = &[
    (0.0, 115.0), (1.0, 113.0), (2.0, 111.0), (3.0, 109.0), (4.0, 107.0), (5.0, 105.0),
    (6.0, 103.0), (7.0, 101.0), (8.0, 99.0), (9.0, 97.0), (10.0, 95.0), (11.0, 93.0),
    (12.0, 91.0), (13.0, 89.0), (14.0, 87.0), (15.0, 85.0), (16.0, 83.0), (17.0, 81.0),
    (18.0, 79.0), (19.0, 77.0), (20.0, 75.0), (21.0, 77.0), (22.0, 79.0), (23.0, 81.0),
    (24.0, 83.0), (25.0, 85.0), (26.0, 87.0), (26.2, 89.0),
];

/// Gradual net climb through the city.
#[rustfmt::skip]
const TOKYO: &[(f64, f64)] = &[
    (0.0, 16.0), (1.0, 18.0), (2.0, 20.0), (3.0, 22.0), (4.0, 25.0), (5.0, 28.0), (6.0, 30.0),
    (7.0, 32.0), (8.0, 35.0), (9.0, 38.0), (10.0, 40.0), (11.0, 42.0), (12.0, 45.0),
    (13.0, 48.0), (14.0, 50.0), (15.0, 52.0), (16.0, 55.0), (17.0, 58.0), (18.0, 60.0),
    (19.0, 62.0), (20.0, 65.0), (21.0, 68.0), (22.0, 70.0), (23.0, 68.0), (24.0, 65.0),
    (25.0, 62.0), (26.0, 60.0), (26.2, 58.0),
];

/// Harbour Bridge early, long climb toward the eastern suburbs.
#[rustfmt::skip]
const SYDNEY: &[(f64, f64)] = &[
    (0.0, 10.0), (1.0, 45.0), (1.5, 134.0), (2.0, 120.0), (2.5, 85.0), (3.0, 60.0),
    (4.0, 45.0), (5.0, 30.0), (6.0, 25.0), (7.0, 20.0), (8.0, 35.0), (9.0, 50.0), (10.0, 65.0),
    (11.0, 80.0), (12.0, 95.0), (13.0, 110.0), (14.0, 125.0), (15.0, 140.0), (16.0, 155.0),
    (17.0, 170.0), (18.0, 185.0), (19.0, 200.0), (20.0, 180.0), (21.0, 160.0), (22.0, 140.0),
    (23.0, 120.0), (24.0, 100.0), (25.0, 80.0), (26.0, 60.0), (26.2, 45.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_profiles_valid() {
        for preset in all() {
            let profile = preset.profile().unwrap();
            assert_eq!(profile.first().distance, 0.0, "{}", preset.id);
            assert!(
                (profile.last().distance - preset.distance).abs() < 1e-9,
                "{} profile does not reach the finish",
                preset.id
            );
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("boston-marathon").unwrap().name, "Boston Marathon");
        assert_eq!(find(" Chicago-Marathon ").unwrap().id, "chicago-marathon");
        assert!(matches!(find("comrades"), Err(PresetError::Unknown(_))));
    }

    #[test]
    fn test_boston_is_net_downhill() {
        let summary = find("boston-marathon").unwrap().profile().unwrap().summary();
        assert!(summary.loss > summary.gain);
        assert_eq!(summary.max_elevation, 580.0);
    }
}
