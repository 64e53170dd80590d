//! Board-agnostic converter logic for the power box firmware
//!
//! This crate contains the parts of the adjustable converter control that
//! do not depend on a specific chip:
//!
//! - Calibration mapper (desired voltage to regulator setpoint)
//! - Effective target state (RAM override vs. persisted preset)
//! - Safety limits and duty-cycle quantization
//! - Persisted configuration types and the preset source/store traits
//! - Converter commands and status exchanged between firmware tasks

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod calibration;
pub mod config;
pub mod safety;
pub mod state;
pub mod traits;
