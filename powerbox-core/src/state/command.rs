//! Converter commands
//!
//! Received from the host link and handled by the power-control side of
//! the converter.

/// Command for the adjustable converter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConverterCommand {
    /// Switch the output on (at the effective target) or off
    SetOutput(bool),
    /// Set a RAM-only target voltage (V), applied immediately if on
    SetVoltage(f32),
    /// Persist a new preset voltage (V) and startup state
    SavePreset { voltage: f32, startup_enabled: bool },
}
