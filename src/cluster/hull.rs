//! Convex hull of a 2D point set using Andrew's monotone chain

use super::point::Point;

/// 2D cross product of OA and OB vectors
///
/// Positive for a counter-clockwise turn O -> A -> B, negative for a
/// clockwise turn and zero when the three points are collinear.
#[inline]
pub fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.x() - o.x()) * (b.y() - o.y()) - (a.y() - o.y()) * (b.x() - o.x())
}

/// Computes the convex hull of a set of 2D points
///
/// Returns the hull vertices in counter-clockwise order, starting from the
/// lexicographically smallest point. Collinear points on an edge are not
/// part of the hull.
///
/// Degenerate inputs: an empty set or a single unique point (possibly
/// repeated) comes back as that set; two unique points, or any set of
/// collinear points, yield the two extreme points.
///
/// O(n log n), dominated by the sort.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted: Vec<Point> = points.iter().map(|p| Point::new(p.x(), p.y())).collect();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.len() <= 1 {
        return sorted;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in &sorted {
        push_turning_left(&mut lower, *p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in sorted.iter().rev() {
        push_turning_left(&mut upper, *p);
    }

    // The last point of each chain is the first point of the other one.
    lower.pop();
    upper.pop();
    lower.append(&mut upper);
    lower
}

/// Pops every point that would not make a strict left turn with `p`, then pushes `p`
fn push_turning_left(chain: &mut Vec<Point>, p: Point) {
    while let [.., o, a] = chain.as_slice() {
        if cross(o, a, &p) > 0.0 {
            break;
        }
        chain.pop();
    }
    chain.push(p);
}
