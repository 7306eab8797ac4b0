#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod alias;
pub mod error;
pub mod preset;

pub use alias::{is_uri, validate_alias_name};
pub use error::{codes, RegistryError};
pub use preset::{is_preset, preset_uri, Preset, PRESETS};
