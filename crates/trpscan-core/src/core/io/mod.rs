//! Provides input/output functionality for structure files and analysis results.
//!
//! This module reads fixed-column coordinate files (splitting multi-model entries
//! into their models), re-formats externally produced annotation listings, and
//! writes contact rows to the append-only result table.

pub mod annotations;
pub mod pdb;
pub mod results;
pub mod traits;
