//! Package cluster implements DBScan clustering and per-cluster convex hulls
pub mod dbscan;
pub mod distance;
pub mod hull;
pub mod point;

#[cfg(test)]
mod dbscan_test;

pub use dbscan::{
    Clustering, DEFAULT_MAX_POINTS, DbscanParams, Memberships, db_scan, db_scan_with,
    expand_cluster, region_query,
};
pub use distance::{
    DEGREE_RAD, Distance, EARTH_RADIUS_METERS, Metric, distance_haversine, distance_planar,
};
pub use hull::{convex_hull, cross};
pub use point::{Cluster, ClusterHull, Label, Membership, Point, PointList};
