//! Powerbox Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the converter logic is written
//! against. Chip-specific HALs implement them so the same controller can
//! drive an RP2040 PWM slice on the board and a recording mock in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (powerbox-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  powerbox-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ powerbox-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pwm::PwmOutput`] - PWM channel driving the regulator control pin
//! - [`flash::FlashStorage`] - Persistent storage for the power configuration

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use pwm::{PwmOutput, PwmSettings};
