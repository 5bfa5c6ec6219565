use std::cmp::Ordering;

use super::hull::convex_hull;

/// Point represents an immutable coordinate pair `(x, y)`
///
/// The point is stored as `[x, y]`. For the great-circle metric:
/// - `[0]` is latitude in decimal degrees
/// - `[1]` is longitude in decimal degrees
///
/// For the planar metric both components share one linear unit.
///
/// Equality and ordering are lexicographic on `(x, y)` using IEEE total
/// ordering, so `Point` can be sorted and deduplicated directly. Signed
/// zeros compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Point(pub [f64; 2]);

/// PointList is a collection of Points
pub type PointList = Vec<Point>;

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        // -0.0 + 0.0 == +0.0
        Point([x + 0.0, y + 0.0])
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0[1]
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        let [x1, y1] = self.0.map(|v| v + 0.0);
        let [x2, y2] = other.0.map(|v| v + 0.0);
        x1.total_cmp(&x2).then_with(|| y1.total_cmp(&y2))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Point {}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Cluster label of a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Label {
    /// Not yet reached by the driver or by any expansion
    #[default]
    Unassigned,
    /// Not density-reachable from any core point (so far)
    Noise,
    /// Member of the cluster with this id (ids start at 1)
    Cluster(usize),
}

impl Label {
    /// Output code of the label: `0` for noise, `n` for cluster `n`.
    ///
    /// Returns `None` for [`Label::Unassigned`], which never survives a
    /// finished clustering pass.
    pub fn code(&self) -> Option<usize> {
        match *self {
            Label::Unassigned => None,
            Label::Noise => Some(0),
            Label::Cluster(id) => Some(id),
        }
    }

    pub fn cluster_id(&self) -> Option<usize> {
        match *self {
            Label::Cluster(id) => Some(id),
            _ => None,
        }
    }
}

/// Per-point clustering state, kept apart from the point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Membership {
    pub visited: bool,
    pub label: Label,
}

/// Cluster represents a result of DBScan clustering work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Cluster ID, starting at 1
    pub c: usize,
    /// Indices of points belonging to this cluster, in input order
    pub points: Vec<usize>,
}

/// Boundary polygon of one cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterHull {
    /// Cluster ID the hull belongs to
    pub c: usize,
    /// Hull vertices, counter-clockwise from the lexicographically smallest point
    pub vertices: Vec<Point>,
}

impl Cluster {
    /// Calculates center and cluster bounds
    ///
    /// Returns `(center, min, max)` where:
    /// - `center` is the centroid of the cluster
    /// - `min` is the minimum point (bottom-left)
    /// - `max` is the maximum point (top-right)
    ///
    /// Returns `None` if the cluster is empty
    pub fn centroid_and_bounds(&self, points: &[Point]) -> Option<(Point, Point, Point)> {
        if self.points.is_empty() {
            return None;
        }

        let mut min = Point([f64::INFINITY, f64::INFINITY]);
        let mut max = Point([f64::NEG_INFINITY, f64::NEG_INFINITY]);
        let mut center = Point([0.0, 0.0]);

        for &i in &self.points {
            let pt = points[i];

            for j in 0..2 {
                center.0[j] += pt.0[j];
                min.0[j] = min.0[j].min(pt.0[j]);
                max.0[j] = max.0[j].max(pt.0[j]);
            }
        }

        for j in 0..2 {
            center.0[j] /= self.points.len() as f64;
        }

        Some((center, min, max))
    }

    /// Computes the convex hull of the cluster members
    pub fn hull(&self, points: &[Point]) -> ClusterHull {
        let members: Vec<Point> = self.points.iter().map(|&i| points[i]).collect();
        ClusterHull {
            c: self.c,
            vertices: convex_hull(&members),
        }
    }
}
