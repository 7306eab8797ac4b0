//! Internal implementation modules for `regm-core`.
//!
//! Callers go through the re-exports in the crate root rather than importing
//! these modules directly.

pub mod config;
pub(crate) mod fs;
pub(crate) mod net;
pub mod npmrc;
pub mod probe;
pub mod runtime;
pub mod store;
pub mod tooling;
