//! Power control for the adjustable converter
//!
//! [`VoltageController`] does not know whether the output is on. This
//! wrapper owns that flag and decides when a command has to re-drive the
//! PWM:
//!
//! | Command      | Output on                        | Output off |
//! |--------------|----------------------------------|------------|
//! | `SetOutput`  | drive effective target / write 0 | same       |
//! | `SetVoltage` | re-apply once                    | no write   |
//! | `SavePreset` | re-apply unless overridden       | no write   |

use powerbox_core::config::PowerConfig;
use powerbox_core::safety::clamp_voltage;
use powerbox_core::state::{ConverterCommand, ConverterStatus};
use powerbox_core::traits::PresetStore;
use powerbox_hal::pwm::PwmOutput;

use super::VoltageController;

/// Converter with tracked output state
pub struct PowerControl<P, S> {
    converter: VoltageController<P, S>,
    output_on: bool,
}

impl<P: PwmOutput, S: PresetStore> PowerControl<P, S> {
    /// Initialize `converter` and track the startup state it applied
    pub fn start(mut converter: VoltageController<P, S>) -> Self {
        converter.initialize();
        let output_on = converter.presets().startup_enabled();
        Self {
            converter,
            output_on,
        }
    }

    /// Handle one command
    ///
    /// Returns the configuration to persist when the preset changed.
    pub fn handle(&mut self, command: ConverterCommand) -> Option<PowerConfig> {
        match command {
            ConverterCommand::SetOutput(on) => {
                self.set_output(on);
                None
            }
            ConverterCommand::SetVoltage(voltage) => {
                self.set_voltage(voltage);
                None
            }
            ConverterCommand::SavePreset {
                voltage,
                startup_enabled,
            } => Some(self.save_preset(voltage, startup_enabled)),
        }
    }

    /// Switch the output on at the effective target, or off
    pub fn set_output(&mut self, on: bool) {
        self.output_on = on;
        self.converter.set_output_state(on);
    }

    /// Set the RAM override, re-applying only if the output is on
    pub fn set_voltage(&mut self, voltage: f32) {
        self.converter.set_target_override(voltage);
        if self.output_on {
            self.converter.set_output_state(true);
        }
    }

    /// Store a new preset, clamped to `[0, max_voltage]`
    ///
    /// An active override keeps winning, so the output is only re-driven
    /// when it is on and no override is set.
    pub fn save_preset(&mut self, voltage: f32, startup_enabled: bool) -> PowerConfig {
        let voltage = clamp_voltage(voltage, self.converter.config().max_voltage);
        let config = self
            .converter
            .presets()
            .store_preset(voltage, startup_enabled);

        if self.output_on && !self.converter.target_state().is_override() {
            self.converter.set_output_state(true);
        }
        config
    }

    /// Check if the output is on
    pub fn is_output_on(&self) -> bool {
        self.output_on
    }

    /// Current status
    pub fn status(&self) -> ConverterStatus {
        ConverterStatus {
            output_on: self.output_on,
            target_v: self.converter.get_effective_target(),
            overridden: self.converter.target_state().is_override(),
        }
    }
}
