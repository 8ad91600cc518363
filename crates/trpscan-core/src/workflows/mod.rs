//! # Workflows Module
//!
//! The top-level entry points of the library.
//!
//! - **Single File** ([`scan`]) - Reads one structure file, splits multi-model entries,
//!   and scans each model independently.
//! - **Batch** ([`batch`]) - Discovers the structure files of a directory, scans them
//!   (in parallel with the `parallel` feature), and appends every contact to one result
//!   table in sorted-path order.
//!
//! A file or model that fails to parse is reported in the returned summary and never
//! stops the remaining work.

pub mod batch;
pub mod scan;
