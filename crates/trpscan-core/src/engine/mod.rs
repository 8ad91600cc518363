//! # Engine Module
//!
//! The analysis machinery that turns a parsed [`Structure`](crate::core::models::structure::Structure)
//! into contact records.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Scan and batch parameters with validating builders
//! - **Contact Scanning** ([`scanner`]) - Radius queries around each query atom, chain and
//!   self filtering, donor classification, and record emission
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - The error type shared by the engine and the workflows
//!
//! Nothing in this layer holds state between structures. The spatial index built for a
//! structure lives only as long as that structure's scan.

pub mod config;
pub mod error;
pub mod progress;
pub mod scanner;
