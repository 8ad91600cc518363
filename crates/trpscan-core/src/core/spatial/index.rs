use crate::core::models::table::AtomTable;
use kiddo::{KdTree, SquaredEuclidean};
use std::collections::HashMap;
use tracing::debug;

// Matches the bucket size of `kiddo::KdTree`. A bucket cannot be split when more
// points than this share one coordinate value on the splitting axis.
const TREE_BUCKET_CAPACITY: usize = 32;

// Widening applied to the tree query; exact distances are re-checked afterwards.
const QUERY_PADDING: f64 = 1e-6;

/// A record index paired with the coordinates it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint {
    pub index: usize,
    pub coords: [f64; 3],
}

impl IndexedPoint {
    fn distance_squared(&self, point: &[f64; 3]) -> f64 {
        let dx = self.coords[0] - point[0];
        let dy = self.coords[1] - point[1];
        let dz = self.coords[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

enum Backend {
    Tree(KdTree<f64, 3>),
    Linear,
}

/// A static radius-query index over a fixed set of points.
///
/// Every point carries the table index it was built from, and queries answer in
/// terms of those indices. The index is immutable after construction and can be
/// shared freely between readers.
pub struct SpatialIndex {
    points: Vec<IndexedPoint>,
    backend: Backend,
}

impl SpatialIndex {
    /// Builds an index over `(index, coordinates)` pairs.
    ///
    /// Point sets where too many points share one coordinate value on an axis for
    /// the tree to partition, or that contain non-finite coordinates, are served by
    /// an exact linear scan instead.
    pub fn build(entries: impl IntoIterator<Item = (usize, [f64; 3])>) -> Self {
        let points: Vec<IndexedPoint> = entries
            .into_iter()
            .map(|(index, coords)| IndexedPoint { index, coords })
            .collect();

        let has_non_finite = points
            .iter()
            .any(|p| p.coords.iter().any(|c| !c.is_finite()));
        if points.is_empty()
            || has_non_finite
            || max_axis_multiplicity(&points) >= TREE_BUCKET_CAPACITY
        {
            debug!(
                "Using linear scan for spatial index over {} point(s).",
                points.len()
            );
            return Self::linear(points);
        }

        let mut tree: KdTree<f64, 3> = KdTree::with_capacity(points.len());
        for (slot, point) in points.iter().enumerate() {
            tree.add(&point.coords, slot as u64);
        }
        debug!("Built k-d tree over {} point(s).", points.len());

        Self {
            points,
            backend: Backend::Tree(tree),
        }
    }

    /// Builds an index over every atom of `table`, keyed by table position.
    pub fn from_table(table: &AtomTable) -> Self {
        Self::build(table.indexed_coordinates())
    }

    #[cfg(test)]
    fn build_linear(entries: impl IntoIterator<Item = (usize, [f64; 3])>) -> Self {
        Self::linear(
            entries
                .into_iter()
                .map(|(index, coords)| IndexedPoint { index, coords })
                .collect(),
        )
    }

    fn linear(points: Vec<IndexedPoint>) -> Self {
        Self {
            points,
            backend: Backend::Linear,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[IndexedPoint] {
        &self.points
    }

    /// Returns the indices of all points within `radius` of `point`, ascending.
    ///
    /// The boundary is inclusive. A point that coincides with `point` is always
    /// part of the result, so callers must exclude the query atom themselves. A
    /// radius of zero or less returns only coincident points.
    pub fn query_ball(&self, point: &[f64; 3], radius: f64) -> Vec<usize> {
        let radius = radius.max(0.0);
        let radius_sq = radius * radius;

        let mut hits: Vec<usize> = match &self.backend {
            Backend::Tree(tree) => {
                let padded = radius + QUERY_PADDING;
                tree.within_unsorted::<SquaredEuclidean>(point, padded * padded)
                    .into_iter()
                    .map(|neighbour| &self.points[neighbour.item as usize])
                    .filter(|candidate| candidate.distance_squared(point) <= radius_sq)
                    .map(|candidate| candidate.index)
                    .collect()
            }
            Backend::Linear => self
                .points
                .iter()
                .filter(|candidate| candidate.distance_squared(point) <= radius_sq)
                .map(|candidate| candidate.index)
                .collect(),
        };

        hits.sort_unstable();
        hits.dedup();
        hits
    }
}

fn max_axis_multiplicity(points: &[IndexedPoint]) -> usize {
    (0..3)
        .map(|axis| {
            let mut counts: HashMap<u64, usize> = HashMap::new();
            for point in points {
                // Fold -0.0 onto 0.0 so equal values share a key.
                let value = point.coords[axis] + 0.0;
                *counts.entry(value.to_bits()).or_insert(0) += 1;
            }
            counts.into_values().max().unwrap_or(0)
        })
        .max()
        .unwrap_or(0)
}
