//! Perlin noise-based course profiles.

use noise::{NoiseFn, Perlin};
use pacing::errors::{PacingError, PacingResult};
use pacing::models::{ElevationPoint, ElevationProfile};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Generates course elevation profiles from Perlin noise.
///
/// Several octaves of noise are summed along the course distance so that a
/// profile has long climbs as well as short rollers.
#[derive(Debug, Clone)]
pub struct ProfileGenerator {
    perlin: Perlin,
    /// Starting elevation in feet.
    base_elevation: f64,
    /// Amplitude of the terrain variation in feet.
    height_scale: f64,
    /// Cycles per mile of the coarsest octave.
    frequency: f64,
    octaves: u32,
}

impl ProfileGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 300.0,
            height_scale: 120.0,
            frequency: 0.15,
            octaves: 4,
        }
    }

    /// Rolling road course, in the spirit of a big-city marathon.
    pub fn rolling(seed: u32) -> Self {
        Self::new(seed)
    }

    /// Hilly course with long climbs.
    pub fn hilly(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 1650.0,
            height_scale: 450.0,
            frequency: 0.1,
            octaves: 5,
        }
    }

    /// Nearly flat course.
    pub fn flat(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 50.0,
            height_scale: 15.0,
            frequency: 0.2,
            octaves: 2,
        }
    }

    pub fn with_base_elevation(mut self, elevation: f64) -> Self {
        self.base_elevation = elevation;
        self
    }

    pub fn with_height_scale(mut self, scale: f64) -> Self {
        self.height_scale = scale;
        self
    }

    pub fn with_frequency(mut self, freq: f64) -> Self {
        self.frequency = freq;
        self
    }

    /// Elevation in feet at `distance_mi` along the course (fBm).
    pub fn elevation_at(&self, distance_mi: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            // second coordinate keeps the 1-D walk off the lattice diagonal
            let noise_val = self.perlin.get([distance_mi * frequency, 0.5]);
            total += noise_val * amplitude;
            max_amplitude += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        let normalized = total / max_amplitude;
        self.base_elevation + normalized * self.height_scale
    }

    /// Samples a profile every `spacing_mi` miles, ending exactly at
    /// `distance_mi`.
    pub fn profile(&self, distance_mi: f64, spacing_mi: f64) -> PacingResult<ElevationProfile> {
        let stations = stations(distance_mi, spacing_mi)?;
        ElevationProfile::new(
            stations
                .into_iter()
                .map(|d| ElevationPoint::new(d, self.elevation_at(d)))
                .collect(),
        )
    }
}

/// Builds a profile as a Gaussian random walk in elevation.
///
/// Each step changes elevation by a normal sample with `std_dev_ft` spread.
pub fn random_walk(
    distance_mi: f64,
    spacing_mi: f64,
    start_ft: f64,
    std_dev_ft: f64,
    rng: &mut impl Rng,
) -> PacingResult<ElevationProfile> {
    let step = Normal::new(0.0, std_dev_ft)
        .map_err(|e| PacingError::InvalidProfile(format!("random walk spread: {e}")))?;

    let mut elevation = start_ft;
    let points = stations(distance_mi, spacing_mi)?
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            if i > 0 {
                elevation += step.sample(rng);
            }
            ElevationPoint::new(d, elevation)
        })
        .collect();

    ElevationProfile::new(points)
}

fn stations(distance_mi: f64, spacing_mi: f64) -> PacingResult<Vec<f64>> {
    if !distance_mi.is_finite() || distance_mi <= 0.0 {
        return Err(PacingError::InvalidDistance(distance_mi));
    }
    if !spacing_mi.is_finite() || spacing_mi <= 0.0 {
        return Err(PacingError::InvalidProfile(format!(
            "sample spacing must be positive, got {spacing_mi}"
        )));
    }

    let mut out: Vec<f64> = (0..)
        .map(|i| i as f64 * spacing_mi)
        .take_while(|d| *d < distance_mi - 1e-9)
        .collect();
    out.push(distance_mi);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_elevation_consistency() {
        let profile_gen = ProfileGenerator::new(42);
        let e1 = profile_gen.elevation_at(7.3);
        let e2 = profile_gen.elevation_at(7.3);
        assert!((e1 - e2).abs() < 0.001);
    }

    #[test]
    fn test_elevation_range() {
        let profile_gen = ProfileGenerator::hilly(7);
        for i in 0..100 {
            let e = profile_gen.elevation_at(i as f64 * 0.262);
            assert!(e >= profile_gen.base_elevation - profile_gen.height_scale);
            assert!(e <= profile_gen.base_elevation + profile_gen.height_scale);
        }
    }

    #[test]
    fn test_profile_spans_distance() {
        let profile = ProfileGenerator::rolling(1).profile(26.2, 0.25).unwrap();
        assert_eq!(profile.first().distance, 0.0);
        assert_eq!(profile.last().distance, 26.2);
        // 0.0..=26.0 every quarter mile, then 26.2
        assert_eq!(profile.len(), 106);
    }

    #[test]
    fn test_profile_rejects_bad_spacing() {
        let profile_gen = ProfileGenerator::flat(3);
        assert!(profile_gen.profile(10.0, 0.0).is_err());
        assert!(profile_gen.profile(-1.0, 0.1).is_err());
    }

    #[test]
    fn test_random_walk() {
        let mut rng = StdRng::seed_from_u64(99);
        let profile = random_walk(13.1, 0.1, 500.0, 8.0, &mut rng).unwrap();
        assert_eq!(profile.first().elevation, 500.0);
        assert_eq!(profile.last().distance, 13.1);

        let mut rng = StdRng::seed_from_u64(99);
        assert!(random_walk(13.1, 0.1, 500.0, f64::NAN, &mut rng).is_err());
    }
}
