//! Elevation profiles from GPX tracks.

use std::path::Path;

use geo::{Distance as _, Haversine, Point};
use gpx::{Gpx, read};
use pacing::errors::PacingError;
use pacing::models::{ElevationPoint, ElevationProfile};
use pacing::units::{FEET_PER_METER, METERS_PER_MILE};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum GpxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("GPX parse error: {0}")]
    Parse(#[from] gpx::errors::GpxError),
    #[error("No tracks found in GPX file")]
    NoTracks,
    #[error("No track segments found")]
    NoSegments,
    #[error("Fewer than two track points carry elevation")]
    NoElevation,
    #[error(transparent)]
    Profile(#[from] PacingError),
}

/// A course read from a GPX file.
#[derive(Debug, Clone)]
pub struct LoadedCourse {
    /// Track or metadata name, if the file has one.
    pub name: Option<String>,
    /// Profile in miles and feet.
    pub profile: ElevationProfile,
}

impl LoadedCourse {
    /// Course length in miles.
    pub fn distance_miles(&self) -> f64 {
        self.profile.last().distance
    }
}

/// Loads elevation profiles from GPX files.
pub struct GpxProfileLoader;

impl GpxProfileLoader {
    pub fn load_file(path: impl AsRef<Path>) -> Result<LoadedCourse, GpxError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let gpx: Gpx = read(reader)?;

        Self::extract_course(&gpx)
    }

    pub fn load_bytes(data: &[u8]) -> Result<LoadedCourse, GpxError> {
        let gpx: Gpx = read(std::io::Cursor::new(data))?;

        Self::extract_course(&gpx)
    }

    /// Flattens all tracks and segments into one distance/elevation profile.
    ///
    /// Distance accumulates along every valid point; only points with an
    /// elevation become profile samples.
    fn extract_course(gpx: &Gpx) -> Result<LoadedCourse, GpxError> {
        if gpx.tracks.is_empty() {
            return Err(GpxError::NoTracks);
        }

        let mut points = Vec::new();
        let mut previous: Option<Point> = None;
        let mut distance_mi = 0.0;
        let mut invalid = 0usize;
        let mut missing_elevation = 0usize;
        let mut seen_any = false;

        for track in &gpx.tracks {
            for segment in &track.segments {
                for waypoint in &segment.points {
                    seen_any = true;
                    let point = waypoint.point();
                    if !valid_coordinate(point) {
                        invalid += 1;
                        continue;
                    }

                    if let Some(prev) = previous {
                        distance_mi += Haversine.distance(prev, point) / METERS_PER_MILE;
                    }
                    previous = Some(point);

                    match waypoint.elevation {
                        Some(meters) if meters.is_finite() => points.push(ElevationPoint::new(
                            distance_mi,
                            meters * FEET_PER_METER,
                        )),
                        _ => missing_elevation += 1,
                    }
                }
            }
        }

        if !seen_any {
            return Err(GpxError::NoSegments);
        }
        if invalid > 0 {
            warn!(invalid, "skipped track points with invalid coordinates");
        }
        if missing_elevation > 0 {
            warn!(missing_elevation, "skipped track points without elevation");
        }
        if points.len() < 2 {
            return Err(GpxError::NoElevation);
        }

        debug!(points = points.len(), distance_mi, "loaded GPX course");

        let name = gpx
            .tracks
            .iter()
            .find_map(|t| t.name.clone())
            .or_else(|| gpx.metadata.as_ref().and_then(|m| m.name.clone()));

        Ok(LoadedCourse {
            name,
            profile: ElevationProfile::new(points)?,
        })
    }
}

fn valid_coordinate(point: Point) -> bool {
    let (lat, lon) = (point.y(), point.x());
    lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(points: &[(f64, f64, Option<f64>)]) -> String {
        let mut gpx = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="courses-test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Test Loop</name>
    <trkseg>
"#,
        );
        for (lat, lon, ele) in points {
            gpx.push_str(&format!(r#"      <trkpt lat="{lat}" lon="{lon}">"#));
            if let Some(ele) = ele {
                gpx.push_str(&format!("<ele>{ele}</ele>"));
            }
            gpx.push_str("</trkpt>\n");
        }
        gpx.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
        gpx
    }

    #[test]
    fn test_load_bytes() {
        // 0.01 degrees of latitude is about 0.69 miles
        let xml = track(&[
            (40.00, -105.3, Some(1650.0)),
            (40.01, -105.3, Some(1660.0)),
            (40.02, -105.3, Some(1650.0)),
        ]);
        let course = GpxProfileLoader::load_bytes(xml.as_bytes()).unwrap();

        assert_eq!(course.name.as_deref(), Some("Test Loop"));
        assert_eq!(course.profile.len(), 3);
        assert_eq!(course.profile.first().distance, 0.0);
        assert!((course.distance_miles() - 1.382).abs() < 0.01);
        assert!((course.profile.first().elevation - 1650.0 * 3.28084).abs() < 1e-6);
    }

    #[test]
    fn test_points_without_elevation_still_count_distance() {
        let xml = track(&[
            (40.00, -105.3, Some(100.0)),
            (40.01, -105.3, None),
            (40.02, -105.3, Some(110.0)),
        ]);
        let course = GpxProfileLoader::load_bytes(xml.as_bytes()).unwrap();
        assert_eq!(course.profile.len(), 2);
        assert!(course.distance_miles() > 1.3);
    }

    #[test]
    fn test_needs_two_elevations() {
        let xml = track(&[(40.00, -105.3, Some(100.0)), (40.01, -105.3, None)]);
        assert!(matches!(
            GpxProfileLoader::load_bytes(xml.as_bytes()),
            Err(GpxError::NoElevation)
        ));
    }

    #[test]
    fn test_no_tracks() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1" creator="x" xmlns="http://www.topografix.com/GPX/1/1"></gpx>"#;
        assert!(matches!(
            GpxProfileLoader::load_bytes(xml.as_bytes()),
            Err(GpxError::NoTracks)
        ));
    }

    #[test]
    fn test_load_file() {
        let xml = track(&[(40.0, -105.3, Some(10.0)), (40.01, -105.3, Some(20.0))]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.gpx");
        std::fs::write(&path, xml).unwrap();

        let course = GpxProfileLoader::load_file(&path).unwrap();
        assert_eq!(course.profile.len(), 2);
    }
}
