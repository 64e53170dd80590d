//! Configuration types
//!
//! Compile-time hardware constants and the persisted power configuration,
//! stored in flash as postcard binary data.

pub mod hardware;
pub mod power;

pub use hardware::*;
pub use power::*;
