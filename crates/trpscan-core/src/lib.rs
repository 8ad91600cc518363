//! # trpscan Core Library
//!
//! Detection of side-chain hydrogen-bond donor atoms in the neighbourhood of tryptophan
//! indole nitrogens (`TRP`/`NE1`) in protein coordinate files.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomRecord`, `AtomTable`,
//!   `Structure`), the static `SpatialIndex`, the donor table, and file I/O (the
//!   fixed-column reader, multi-model splitting, annotation extraction, and the CSV sink).
//!
//! - **[`engine`]: The Logic Core.** The `ContactScanner`, its configuration, progress
//!   reporting, and error types.
//!
//! - **[`workflows`]: The Public API.** Complete procedures: scanning a single file and
//!   batch-processing a directory into one aggregate result table.

pub mod core;
pub mod engine;
pub mod workflows;
