//! Adjustable converter regulation

pub mod controller;
pub mod power;
pub mod shared;

#[cfg(test)]
mod mock;

pub use controller::VoltageController;
pub use power::PowerControl;
pub use shared::SharedConfig;
