//! DBSCAN point clustering with convex hull boundaries
//!
//! Points (latitude/longitude or planar coordinates) are grouped with
//! DBSCAN under a pluggable distance metric, and every resulting cluster
//! is summarised by its convex hull.
//!
//! ```no_run
//! use dbscan_hull::cluster::{DbscanParams, Metric, Point, db_scan};
//!
//! let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 1.0)];
//! let clustering = db_scan(&points, &DbscanParams::new(1.5, 3, Metric::Planar))?;
//! for hull in clustering.hulls(&points) {
//!     println!("cluster {}: {:?}", hull.c, hull.vertices);
//! }
//! # Ok::<(), dbscan_hull::Error>(())
//! ```

pub mod cluster;
pub mod error;
pub mod input;
pub mod output;


pub use error::{Error, Result};
