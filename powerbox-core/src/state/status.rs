//! Converter status
//!
//! Reported by the power-control side after every command.

/// Observable state of the adjustable converter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConverterStatus {
    /// Output is switched on
    pub output_on: bool,
    /// Effective target voltage (V), override or preset
    pub target_v: f32,
    /// A RAM override is in force
    pub overridden: bool,
}
