//! Distance metric on SE(3) and nearest-neighbor ranking

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::f64::consts::PI;

use itertools::Itertools;
use nalgebra::UnitQuaternion;
use ordered_float::OrderedFloat;

use crate::common::Configuration;
use crate::path_planning::se3_rrt::config::PlannerConfig;
use crate::path_planning::se3_rrt::tree::Tree;

/// Rotation angle (in `[0, pi]`) between two orientations.
///
/// Uses the chord/antichord form so that identical inputs give exactly
/// zero and swapping the arguments gives exactly the same value.
pub fn rotation_geodesic(a: &UnitQuaternion<f64>, b: &UnitQuaternion<f64>) -> f64 {
    let (qa, qb) = (&a.coords, &b.coords);
    let diff = (qa - qb).norm();
    let sum = (qa + qb).norm();
    // q and -q are the same rotation
    let (near, far) = if qa.dot(qb) >= 0.0 { (diff, sum) } else { (sum, diff) };
    4.0 * near.atan2(far)
}

/// Weighted sum of the rotation geodesic and the translation distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Se3Metric {
    pub rotation_weight: f64,
    pub translation_weight: f64,
}

impl Default for Se3Metric {
    fn default() -> Self {
        Self {
            rotation_weight: 1.0 / PI,
            translation_weight: 1.0,
        }
    }
}

impl Se3Metric {
    pub fn new(rotation_weight: f64, translation_weight: f64) -> Self {
        Self {
            rotation_weight,
            translation_weight,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.rotation_weight, config.translation_weight)
    }

    pub fn distance(&self, a: &Configuration, b: &Configuration) -> f64 {
        self.rotation_weight * rotation_geodesic(&a.orientation, &b.orientation)
            + self.translation_weight * (a.position - b.position).norm()
    }
}

/// Indices of the vertices of `tree` in ascending distance from `query`.
///
/// `k = None` ranks every vertex; `Some(k)` stops after the `k` closest.
/// Ties are broken by insertion index.
pub fn nearest_neighbor_indices<S>(
    metric: &Se3Metric,
    query: &Configuration,
    tree: &Tree<S>,
    k: Option<usize>,
) -> Vec<usize> {
    let keyed = tree
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, v)| (OrderedFloat(metric.distance(query, v.config())), i));

    match k {
        None => keyed.sorted().map(|(_, i)| i).collect(),
        Some(k) => {
            let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, usize)>> = keyed.map(Reverse).collect();
            let count = k.min(heap.len());
            (0..count)
                .filter_map(|_| heap.pop())
                .map(|Reverse((_, i))| i)
                .collect()
        }
    }
}
