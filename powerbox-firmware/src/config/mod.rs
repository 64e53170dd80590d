//! Configuration persistence

pub mod persistence;

pub use persistence::{load_power_config, save_power_config};
