//! Voltage and duty-cycle limits

/// Clamp a requested voltage to `[0, max_v]`
///
/// NaN requests clamp to 0 V.
pub fn clamp_voltage(voltage: f32, max_v: f32) -> f32 {
    // f32::max returns the non-NaN operand
    voltage.max(0.0).min(max_v)
}

/// Quantized duty value ready to be written to the PWM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCycle {
    /// Duty value in `0..=max_duty`
    pub value: u32,
    /// The unclamped duty fell outside `0..=max_duty`
    pub clamped: bool,
}

/// Convert a calibrated setpoint into a duty value
///
/// `duty = round(setpoint / max_v * max_duty)`, then limited to
/// `0..=max_duty`. Extrapolated setpoints just outside the calibration
/// table can land slightly below zero or above full scale; those are
/// clamped and reported through [`DutyCycle::clamped`].
pub fn duty_for_setpoint(setpoint_v: f32, max_v: f32, max_duty: u32) -> DutyCycle {
    let raw = setpoint_v / max_v * max_duty as f32;

    if !(raw >= 0.0) {
        return DutyCycle {
            value: 0,
            clamped: raw < 0.0 || raw.is_nan(),
        };
    }

    // Round half up; `as` saturates for values past u32::MAX
    let rounded = (raw + 0.5) as u32;
    if rounded > max_duty {
        DutyCycle {
            value: max_duty,
            clamped: true,
        }
    } else {
        DutyCycle {
            value: rounded,
            clamped: false,
        }
    }
}
