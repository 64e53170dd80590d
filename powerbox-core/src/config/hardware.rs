//! Hardware configuration for the adjustable converter
//!
//! These constants form the contract between the controller and the
//! board: the safety ceiling and the PWM carrier used to program the
//! converter's control pin.

/// Safety ceiling for the converter output (V)
///
/// Also the full-scale voltage of the setpoint axis: a setpoint equal to
/// `MAX_VOLTAGE` corresponds to 100% duty.
pub const MAX_VOLTAGE: f32 = 15.15;

/// PWM channel wired to the converter control pin
pub const PWM_CHANNEL: u8 = 0;

/// PWM carrier frequency (Hz)
///
/// Top of the SC8903 VPWM input range (20-100 kHz).
pub const PWM_FREQUENCY_HZ: u32 = 100_000;

/// PWM duty-cycle resolution (bits)
///
/// 8 bits gives ~59 mV steps over the 15.15 V range.
pub const PWM_RESOLUTION_BITS: u8 = 8;

/// Regulator output configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegulatorConfig {
    /// PWM channel driving the control pin
    pub channel: u8,
    /// PWM carrier frequency (Hz)
    pub frequency_hz: u32,
    /// Duty-cycle resolution (bits)
    pub resolution_bits: u8,
    /// Safety ceiling and setpoint full scale (V)
    pub max_voltage: f32,
}

impl RegulatorConfig {
    /// Configuration of the reference board
    pub const fn reference() -> Self {
        Self {
            channel: PWM_CHANNEL,
            frequency_hz: PWM_FREQUENCY_HZ,
            resolution_bits: PWM_RESOLUTION_BITS,
            max_voltage: MAX_VOLTAGE,
        }
    }
}

impl Default for RegulatorConfig {
    fn default() -> Self {
        Self::reference()
    }
}
