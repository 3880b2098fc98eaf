//! Geodesic primitives: great-circle distance, rhumb-line bearing,
//! wraparound-aware angular deviation, and compass bucketing.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};
use std::fmt;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Unit used for distances reported to the caller.
///
/// Internally everything is computed in meters and converted at the edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Meters,
    Kilometers,
    #[default]
    StatuteMiles,
    NauticalMiles,
}

impl DistanceUnit {
    /// Convert a distance in meters to this unit.
    pub fn convert(self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Meters => meters,
            DistanceUnit::Kilometers => meters / 1_000.0,
            DistanceUnit::StatuteMiles => meters / 1_609.344,
            DistanceUnit::NauticalMiles => meters / 1_852.0,
        }
    }
}

/// Great-circle distance between two points in meters (haversine).
pub fn haversine_distance_m(a: Coord, b: Coord) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Great-circle distance converted to the requested unit.
pub fn distance(a: Coord, b: Coord, unit: DistanceUnit) -> f64 {
    unit.convert(haversine_distance_m(a, b))
}

/// Initial rhumb-line (loxodrome) bearing from `from` toward `to`,
/// in degrees in `[0, 360)`.
pub fn rhumb_bearing_deg(from: Coord, to: Coord) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let mut dlambda = (to.lon - from.lon).to_radians();
    // Take the shorter path across the anti-meridian.
    if dlambda.abs() > PI {
        dlambda = if dlambda > 0.0 {
            dlambda - 2.0 * PI
        } else {
            dlambda + 2.0 * PI
        };
    }

    let dpsi = ((FRAC_PI_4 + phi2 / 2.0).tan() / (FRAC_PI_4 + phi1 / 2.0).tan()).ln();
    let theta = dlambda.atan2(dpsi).to_degrees();
    theta.rem_euclid(360.0)
}

/// Minimal absolute angle between two bearings, in `[0, 180]`.
///
/// Handles wraparound at 0/360 so that 359 and 1 are 2 degrees apart.
/// Must be used wherever two bearings are compared.
pub fn angular_deviation_deg(b1: f64, b2: f64) -> f64 {
    180.0 - ((b1 - b2).abs() - 180.0).abs()
}

/// 16-wind compass rose direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compass {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl Compass {
    const ROSE: [Compass; 16] = [
        Compass::N,
        Compass::NNE,
        Compass::NE,
        Compass::ENE,
        Compass::E,
        Compass::ESE,
        Compass::SE,
        Compass::SSE,
        Compass::S,
        Compass::SSW,
        Compass::SW,
        Compass::WSW,
        Compass::W,
        Compass::WNW,
        Compass::NW,
        Compass::NNW,
    ];

    /// Bucket a bearing in degrees onto the 16-wind rose.
    pub fn from_bearing_deg(bearing: f64) -> Self {
        let sector = (bearing.rem_euclid(360.0) / 22.5).round() as usize % 16;
        Self::ROSE[sector]
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Coarse compass label from `from` toward `to`. Display metadata only,
/// never used for filtering.
pub fn compass_bucket(from: Coord, to: Coord) -> Compass {
    Compass::from_bearing_deg(rhumb_bearing_deg(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let d = haversine_distance_m(Coord::new(0.0, 0.0), Coord::new(1.0, 0.0));
        assert!((d - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = Coord::new(43.4356, 5.2138);
        let b = Coord::new(48.7262, 2.3652);
        let d1 = haversine_distance_m(a, b);
        let d2 = haversine_distance_m(b, a);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn distance_unit_conversion() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(1.0, 0.0);
        let m = distance(a, b, DistanceUnit::Meters);
        let sm = distance(a, b, DistanceUnit::StatuteMiles);
        let nm = distance(a, b, DistanceUnit::NauticalMiles);
        assert!((sm - m / 1_609.344).abs() < 1e-9);
        assert!((nm - m / 1_852.0).abs() < 1e-9);
        // 1 degree of latitude is 60 nautical miles by definition (spherical).
        assert!((nm - 60.0).abs() < 0.1);
    }

    #[test]
    fn rhumb_bearing_cardinal_directions() {
        let origin = Coord::new(0.0, 0.0);
        let north = rhumb_bearing_deg(origin, Coord::new(1.0, 0.0));
        let east = rhumb_bearing_deg(origin, Coord::new(0.0, 1.0));
        let south = rhumb_bearing_deg(origin, Coord::new(-1.0, 0.0));
        let west = rhumb_bearing_deg(origin, Coord::new(0.0, -1.0));
        assert!(north.abs() < 1e-6);
        assert!((east - 90.0).abs() < 1e-6);
        assert!((south - 180.0).abs() < 1e-6);
        assert!((west - 270.0).abs() < 1e-6);
    }

    #[test]
    fn rhumb_bearing_crosses_antimeridian() {
        // From just west of the date line to just east: shortest rhumb is eastbound.
        let b = rhumb_bearing_deg(Coord::new(0.0, 179.5), Coord::new(0.0, -179.5));
        assert!((b - 90.0).abs() < 1e-6);
    }

    #[test]
    fn angular_deviation_wraps_at_north() {
        assert!((angular_deviation_deg(359.0, 1.0) - 2.0).abs() < 1e-9);
        assert!((angular_deviation_deg(10.0, 350.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn angular_deviation_properties() {
        for b1 in [0.0, 45.0, 123.4, 270.0, 359.9] {
            for b2 in [0.0, 90.0, 180.1, 310.0] {
                let d = angular_deviation_deg(b1, b2);
                assert!((0.0..=180.0).contains(&d));
                assert!((d - angular_deviation_deg(b2, b1)).abs() < 1e-9);
            }
            assert!(angular_deviation_deg(b1, b1).abs() < 1e-9);
        }
    }

    #[test]
    fn compass_bucket_sectors() {
        assert_eq!(Compass::from_bearing_deg(0.0), Compass::N);
        assert_eq!(Compass::from_bearing_deg(11.0), Compass::N);
        assert_eq!(Compass::from_bearing_deg(22.5), Compass::NNE);
        assert_eq!(Compass::from_bearing_deg(90.0), Compass::E);
        assert_eq!(Compass::from_bearing_deg(225.0), Compass::SW);
        assert_eq!(Compass::from_bearing_deg(355.0), Compass::N);
    }
}
