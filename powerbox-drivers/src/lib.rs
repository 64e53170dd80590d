//! Hardware driver implementations
//!
//! This crate provides the concrete converter driver built on the traits
//! of `powerbox-core` and `powerbox-hal`:
//!
//! - Voltage controller (calibrated open-loop PWM output)
//! - Power control (tracked on/off state over the controller)
//! - Lock-guarded shared power configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod regulator;
