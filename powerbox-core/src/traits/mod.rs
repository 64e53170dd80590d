//! Collaborator traits
//!
//! These traits define the interface between the converter logic and the
//! firmware-owned shared state.

pub mod preset;

pub use preset::{PresetSource, PresetStore};
