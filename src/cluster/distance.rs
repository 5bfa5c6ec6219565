use std::f64::consts::PI;

use super::point::Point;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Earth radius in meters
pub const EARTH_RADIUS_METERS: f64 = 6378100.0;

/// Distance function used by the neighborhood query
///
/// Implementations must be symmetric, non-negative and return zero for
/// identical points. Plain functions and closures with the signature
/// `Fn(&Point, &Point) -> f64` implement it too.
pub trait Distance {
    fn distance(&self, a: &Point, b: &Point) -> f64;
}

impl<F> Distance for F
where
    F: Fn(&Point, &Point) -> f64,
{
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        self(a, b)
    }
}

/// Built-in metrics, picked by the caller to match the coordinate semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Metric {
    /// Euclidean distance in the unit of the coordinates
    Planar,
    /// Haversine distance in meters; points are (latitude, longitude) in degrees
    #[default]
    GreatCircle,
}

impl Distance for Metric {
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        match self {
            Metric::Planar => distance_planar(a, b),
            Metric::GreatCircle => distance_haversine(a, b),
        }
    }
}

/// Calculates Euclidean distance between two points
pub fn distance_planar(p1: &Point, p2: &Point) -> f64 {
    (p2.x() - p1.x()).hypot(p2.y() - p1.y())
}

/// Calculates great-circle distance between two (latitude, longitude) points
///
/// # Returns
///
/// Distance in meters
pub fn distance_haversine(p1: &Point, p2: &Point) -> f64 {
    let lat1 = p1.x() * DEGREE_RAD;
    let lat2 = p2.x() * DEGREE_RAD;
    let d_lat = lat2 - lat1;
    let d_lon = (p2.y() - p1.y()) * DEGREE_RAD;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just outside [0, 1] for near-identical or
    // near-antipodal points, where asin is undefined.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_METERS * c
}
