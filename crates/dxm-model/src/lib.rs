#![deny(missing_docs)]
//! Ordered, identity-aware collection of experiment records and its
//! alias-preserving persistence adapter.
//!
//! The collection compares component handles by instance identity, never
//! by payload value; serialization deduplicates shared components into a
//! token table so the sharing graph is reconstructed exactly on load.

mod filter;
mod hash;
mod io;
mod list;
mod serialization;

pub use filter::ExperimentFilter;
pub use hash::canonical_hash;
pub use io::{read_json_file, write_json_file};
pub use list::ExperimentList;
pub use serialization::{list_from_bytes, list_from_json, list_to_bytes, list_to_json};
