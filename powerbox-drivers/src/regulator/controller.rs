//! Voltage controller for the adjustable converter
//!
//! Converts a target voltage into a PWM duty value for the converter's
//! control pin. The loop is open: nothing is measured, the calibration
//! table corrects for the converter's non-linear response.
//!
//! # Output state contract
//!
//! The controller does not track whether the output is on. Changing the
//! override with [`VoltageController::set_target_override`] touches no
//! hardware; the caller that owns the on/off state (normally
//! [`PowerControl`](super::PowerControl)) re-applies with
//! `set_output_state(true)` when the output is on.
//!
//! ```ignore
//! let mut converter = VoltageController::new(pwm, &CONFIG, RegulatorConfig::reference());
//! converter.initialize();
//!
//! converter.set_target_override(9.0);
//! if output_on {
//!     converter.set_output_state(true);
//! }
//! ```

use powerbox_core::calibration::{CalibrationTable, REFERENCE_TABLE};
use powerbox_core::config::RegulatorConfig;
use powerbox_core::safety::{clamp_voltage, duty_for_setpoint, DutyCycle};
use powerbox_core::state::TargetState;
use powerbox_core::traits::PresetSource;
use powerbox_hal::pwm::{PwmOutput, PwmSettings};

/// Voltage controller
///
/// Owns the RAM override; the preset is read from `S` on demand.
pub struct VoltageController<P, S> {
    pwm: P,
    presets: S,
    config: RegulatorConfig,
    table: CalibrationTable<'static>,
    target: TargetState,
}

impl<P: PwmOutput, S: PresetSource> VoltageController<P, S> {
    /// Create a controller using the reference calibration table
    ///
    /// The PWM is not touched until [`initialize`](Self::initialize).
    pub fn new(pwm: P, presets: S, config: RegulatorConfig) -> Self {
        Self::with_table(pwm, presets, config, REFERENCE_TABLE)
    }

    /// Create a controller with a board-specific calibration table
    pub fn with_table(
        pwm: P,
        presets: S,
        config: RegulatorConfig,
        table: CalibrationTable<'static>,
    ) -> Self {
        Self {
            pwm,
            presets,
            config,
            table,
            target: TargetState::NoOverride,
        }
    }

    /// PWM settings derived from the regulator configuration
    pub fn pwm_settings(&self) -> PwmSettings {
        PwmSettings::new(
            self.config.channel,
            self.config.frequency_hz,
            self.config.resolution_bits,
        )
    }

    /// Configure the PWM and apply the startup state
    ///
    /// Any RAM override is discarded here, so every boot starts from the
    /// persisted preset.
    pub fn initialize(&mut self) {
        self.pwm_settings().apply(&mut self.pwm);
        self.target.reset();

        let startup_enabled = self.presets.startup_enabled();
        self.set_output_state(startup_enabled);
    }

    /// Drive the output at the effective target, or switch it off
    pub fn set_output_state(&mut self, on: bool) {
        let channel = self.config.channel;

        if !on {
            self.pwm.write_duty(channel, 0);
            return;
        }

        let target_v = self.target.resolve(|| self.presets.snapshot());
        let duty = self.duty_for_target(target_v);

        #[cfg(feature = "defmt")]
        if duty.clamped {
            defmt::warn!(
                "Converter duty out of range for {} V, clamped to {}",
                target_v,
                duty.value
            );
        }

        self.pwm.write_duty(channel, duty.value);
    }

    /// Set a RAM-only target voltage, clamped to `[0, max_voltage]`
    ///
    /// Does not re-drive the output; see the module docs.
    pub fn set_target_override(&mut self, voltage: f32) {
        self.target
            .set_override(clamp_voltage(voltage, self.config.max_voltage));
    }

    /// Target voltage currently requested (override, else preset)
    ///
    /// Not clamped: a preset above the ceiling is reported as stored even
    /// though the output is limited when applied.
    pub fn get_effective_target(&self) -> f32 {
        self.target.resolve(|| self.presets.snapshot())
    }

    /// Duty value that `set_output_state(true)` writes for `target_v`
    pub fn duty_for_target(&self, target_v: f32) -> DutyCycle {
        let max_v = self.config.max_voltage;
        let setpoint = self.table.setpoint_for(clamp_voltage(target_v, max_v));
        duty_for_setpoint(setpoint, max_v, self.pwm_settings().max_duty())
    }

    /// Current target state
    pub fn target_state(&self) -> TargetState {
        self.target
    }

    /// Regulator configuration
    pub fn config(&self) -> &RegulatorConfig {
        &self.config
    }

    /// Preset source
    pub fn presets(&self) -> &S {
        &self.presets
    }
}
