//! # Core Module
//!
//! The foundation layer: stateless data models, the spatial index, fixed residue
//! knowledge, and file I/O.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atom records, atom tables, structures, and contact rows
//! - **Spatial Queries** ([`spatial`]) - The radius-query index built over a structure's coordinates
//! - **Structural Knowledge** ([`topology`]) - The side-chain hydrogen-bond donor table
//! - **File I/O** ([`io`]) - Structure reading, model splitting, annotation extraction, and result output

pub mod io;
pub mod models;
pub mod spatial;
pub mod topology;
