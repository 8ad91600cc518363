//! # Core Models Module
//!
//! Data structures describing the atoms of a loaded structure file.
//!
//! ## Key Components
//!
//! - [`atom`] - A single immutable coordinate record and its named fields
//! - [`table`] - The ordered atom collection with attribute-filtered lookups
//! - [`structure`] - One analysable structure (a file or one model of a file) and its model id
//! - [`contact`] - A donor contact found around a query atom, one row of the result table
//!
//! Atoms carry no key of their own: an atom is identified by its position in the
//! owning [`table::AtomTable`], and every index handed out by the library refers to
//! that position.

pub mod atom;
pub mod contact;
pub mod structure;
pub mod table;
