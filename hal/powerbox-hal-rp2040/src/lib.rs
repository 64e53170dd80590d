//! RP2040-specific HAL for the power box firmware
//!
//! Implements the shared `powerbox-hal` traits on RP2040 peripherals:
//!
//! - PWM slice output for the converter control pin (implements `powerbox_hal::PwmOutput`)
//! - Flash storage driver (implements `powerbox_hal::FlashStorage`)

#![no_std]

pub mod flash;
pub mod pwm;

// Re-export shared traits from powerbox-hal for convenience
pub use powerbox_hal::{FlashStorage as FlashStorageTrait, PwmOutput, StorageKey};
