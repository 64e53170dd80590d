//! Safety limits
//!
//! Clamping of requested voltages and quantization of setpoints into
//! duty values that are always within the PWM's range.

pub mod limits;

pub use limits::{clamp_voltage, duty_for_setpoint, DutyCycle};
