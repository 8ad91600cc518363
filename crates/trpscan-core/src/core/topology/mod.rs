//! Fixed structural knowledge about residues.
//!
//! - [`donors`] - The side-chain hydrogen-bond donor table and its classifier

pub mod donors;
