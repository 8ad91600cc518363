//! Spatial queries over atomic coordinates.
//!
//! [`index::SpatialIndex`] answers inclusive radius-ball queries and reports its
//! results as the table positions the points were built from.

pub mod index;
