use std::collections::VecDeque;

use bitvec::prelude::*;
use tracing::{debug, trace};

use super::distance::{Distance, Metric};
use super::point::{Cluster, ClusterHull, Label, Membership, Point};
use crate::error::{Error, Result};

// DBSCAN algorithm pseudocode (from <http://en.wikipedia.org/wiki/DBSCAN>):
//
// DBSCAN(D, eps, MinPts)
//    C = 0
//    for each unvisited point P in dataset D
//       mark P as visited
//       NeighborPts = regionQuery(P, eps)
//       if sizeof(NeighborPts) < MinPts
//          mark P as NOISE
//       else
//          C = next cluster
//          expandCluster(P, NeighborPts, C, eps, MinPts)
//
// expandCluster(P, NeighborPts, C, eps, MinPts)
//    add P to cluster C
//    for each point P' in NeighborPts
//       if P' is not visited
//          mark P' as visited
//          NeighborPts' = regionQuery(P', eps)
//          if sizeof(NeighborPts') >= MinPts
//             NeighborPts = NeighborPts joined with NeighborPts'
//       if P' is not yet member of any cluster
//          add P' to cluster C
//
// regionQuery(P, eps)
//    return all points within P's eps-neighbourhood (including P)

/// Default cap on the number of points accepted by one clustering pass
pub const DEFAULT_MAX_POINTS: usize = 100_000;

/// Parameters of a clustering pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DbscanParams {
    /// Neighbourhood radius, in the unit the metric returns
    /// (meters for great-circle)
    pub eps: f64,
    /// Minimum neighbourhood size (the point itself included) of a core point
    pub min_points: usize,
    /// Distance metric matching the coordinate semantics
    pub metric: Metric,
    /// Upper bound on the input size; `None` accepts any size
    pub max_points: Option<usize>,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 300.0,
            min_points: 3,
            metric: Metric::GreatCircle,
            max_points: Some(DEFAULT_MAX_POINTS),
        }
    }
}

impl DbscanParams {
    pub fn new(eps: f64, min_points: usize, metric: Metric) -> Self {
        Self {
            eps,
            min_points,
            metric,
            ..Self::default()
        }
    }

    pub fn with_max_points(mut self, max_points: Option<usize>) -> Self {
        self.max_points = max_points;
        self
    }

    /// Checks the parameters against an input of `num_points` points
    pub fn validate(&self, num_points: usize) -> Result<()> {
        if self.eps.is_nan() || self.eps <= 0.0 {
            return Err(Error::invalid_parameter(
                "eps",
                format!("must be greater than 0, got {}", self.eps),
            ));
        }
        if self.min_points < 1 {
            return Err(Error::invalid_parameter("min_points", "must be at least 1"));
        }
        if let Some(limit) = self.max_points {
            if num_points > limit {
                return Err(Error::TooManyPoints {
                    count: num_points,
                    limit,
                });
            }
        }
        Ok(())
    }
}

/// Clustering state of every point, indexed like the point list
///
/// Shared by the driver, expansion and the neighbourhood query for the
/// duration of one pass.
#[derive(Debug, Clone)]
pub struct Memberships {
    visited: BitVec,
    labels: Vec<Label>,
}

impl Memberships {
    pub fn new(len: usize) -> Self {
        Self {
            visited: bitvec![0; len],
            labels: vec![Label::Unassigned; len],
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, i: usize) -> Membership {
        Membership {
            visited: self.visited[i],
            label: self.labels[i],
        }
    }

    pub fn is_visited(&self, i: usize) -> bool {
        self.visited[i]
    }

    /// Marks point `i` visited, returning whether it was unvisited before
    pub fn visit(&mut self, i: usize) -> bool {
        !self.visited.replace(i, true)
    }

    pub fn label(&self, i: usize) -> Label {
        self.labels[i]
    }

    /// Labels point `i` as noise unless it already belongs to a cluster
    pub fn mark_noise(&mut self, i: usize) {
        if self.labels[i] == Label::Unassigned {
            self.labels[i] = Label::Noise;
        }
    }

    /// Assigns point `i` to cluster `c` if it has no cluster yet
    ///
    /// Unassigned and noise points are claimed; points that already belong
    /// to a cluster keep it. Returns whether the label changed.
    pub fn claim(&mut self, i: usize, c: usize) -> bool {
        match self.labels[i] {
            Label::Unassigned | Label::Noise => {
                self.labels[i] = Label::Cluster(c);
                true
            }
            Label::Cluster(_) => false,
        }
    }

    fn into_labels(self) -> Vec<Label> {
        self.labels
    }
}

/// Result of a finished clustering pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    labels: Vec<Label>,
    cluster_count: usize,
}

impl Clustering {
    /// Label of point `i`
    pub fn label(&self, i: usize) -> Label {
        self.labels[i]
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Labels as output codes: `0` for noise, `n` for cluster `n`
    pub fn label_codes(&self) -> Vec<usize> {
        self.labels
            .iter()
            .map(|label| label.code().unwrap_or(0))
            .collect()
    }

    /// Number of clusters found; ids run from 1 to this value
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Indices of noise points, in input order
    pub fn noise(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == Label::Noise)
            .map(|(i, _)| i)
            .collect()
    }

    /// Groups points by cluster id
    ///
    /// Clusters come in ascending id order, members in input order.
    pub fn clusters(&self) -> Vec<Cluster> {
        let mut clusters: Vec<Cluster> = (1..=self.cluster_count)
            .map(|c| Cluster {
                c,
                points: Vec::new(),
            })
            .collect();

        for (i, label) in self.labels.iter().enumerate() {
            if let Some(c) = label.cluster_id() {
                clusters[c - 1].points.push(i);
            }
        }

        clusters
    }

    /// Convex hull of every cluster, in ascending id order
    ///
    /// `points` must be the list the clustering was computed on.
    pub fn hulls(&self, points: &[Point]) -> Vec<ClusterHull> {
        self.clusters()
            .iter()
            .map(|cluster| cluster.hull(points))
            .collect()
    }
}

/// Clusters incoming points using DBSCAN algorithm
///
/// # Arguments
///
/// * `points` - List of points to cluster
/// * `params` - Radius, density threshold, metric and input-size cap
///
/// # Errors
///
/// [`Error::InvalidParameter`] for `eps <= 0` or `min_points < 1` and
/// [`Error::TooManyPoints`] above the cap; nothing is computed in either case.
///
/// Border points reachable from two clusters stay with whichever cluster
/// reaches them first in input order.
pub fn db_scan(points: &[Point], params: &DbscanParams) -> Result<Clustering> {
    db_scan_with(points, params, &params.metric)
}

/// Same as [`db_scan`], measuring distances with `distance` instead of
/// `params.metric`
pub fn db_scan_with<D>(points: &[Point], params: &DbscanParams, distance: &D) -> Result<Clustering>
where
    D: Distance + ?Sized,
{
    params.validate(points.len())?;

    debug!(
        points = points.len(),
        eps = params.eps,
        min_points = params.min_points,
        "Running DBSCAN"
    );

    let mut memberships = Memberships::new(points.len());
    let mut c = 0;

    for i in 0..points.len() {
        if !memberships.visit(i) {
            continue;
        }

        let neighbor_pts = region_query(points, &points[i], params.eps, distance);
        if neighbor_pts.len() < params.min_points {
            memberships.mark_noise(i);
        } else {
            c += 1;
            memberships.claim(i, c);
            expand_cluster(
                points,
                &mut memberships,
                neighbor_pts,
                c,
                params.eps,
                params.min_points,
                distance,
            );
        }
    }

    let clustering = Clustering {
        labels: memberships.into_labels(),
        cluster_count: c,
    };

    debug!(
        clusters = clustering.cluster_count,
        noise = clustering.noise().len(),
        "DBSCAN finished"
    );

    Ok(clustering)
}

/// Grows cluster `c` from the neighbourhood of its seed point
///
/// `seeds` is a FIFO work queue. Neighbourhoods of newly visited core points
/// are appended to it, skipping points already queued during this expansion,
/// so the queue never holds more than `points.len()` entries. Every dequeued
/// point that has no cluster yet (noise included) joins `c`.
///
/// Returns the number of points taken from the queue.
pub fn expand_cluster<D>(
    points: &[Point],
    memberships: &mut Memberships,
    seeds: Vec<usize>,
    c: usize,
    eps: f64,
    min_points: usize,
    distance: &D,
) -> usize
where
    D: Distance + ?Sized,
{
    let mut queued = bitvec![0; points.len()];
    let mut queue = VecDeque::with_capacity(seeds.len());
    for k in seeds {
        if !queued.replace(k, true) {
            queue.push_back(k);
        }
    }

    let mut dequeued = 0;
    while let Some(k) = queue.pop_front() {
        dequeued += 1;

        if memberships.visit(k) {
            let more_neighbors = region_query(points, &points[k], eps, distance);
            if more_neighbors.len() >= min_points {
                for p in more_neighbors {
                    if !queued.replace(p, true) {
                        queue.push_back(p);
                    }
                }
            }
        }

        if memberships.claim(k, c) {
            trace!(point = k, cluster = c, "Point joined cluster");
        }
    }

    dequeued
}

/// Simple O(N) way to find points in neighbourhood
///
/// Returns indices of every point within `eps` of `p` (inclusive), `p`
/// itself included when it is part of `points`.
pub fn region_query<D>(points: &[Point], p: &Point, eps: f64, distance: &D) -> Vec<usize>
where
    D: Distance + ?Sized,
{
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| distance.distance(p, point) <= eps)
        .map(|(i, _)| i)
        .collect()
}
