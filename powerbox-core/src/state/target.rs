//! Effective target state
//!
//! ```text
//!   NoOverride ──set_override(v)──▶ Override(v) ──set_override(v')──▶ Override(v')
//!        ▲                                                                  │
//!        └────────────────────────────── reset() ◀──────────────────────────┘
//! ```
//!
//! Only `reset()` (run at boot) returns to `NoOverride`; an override is
//! never cleared implicitly and is never persisted.

use crate::config::ConverterPreset;

/// Target voltage currently in force for the converter
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetState {
    /// Use the persisted preset voltage
    #[default]
    NoOverride,
    /// Use a RAM-only voltage (V)
    Override(f32),
}

impl TargetState {
    /// Replace the target with a RAM override
    pub fn set_override(&mut self, voltage: f32) {
        *self = TargetState::Override(voltage);
    }

    /// Drop any override so the preset applies again
    pub fn reset(&mut self) {
        *self = TargetState::NoOverride;
    }

    /// Check if an override is in force
    pub fn is_override(&self) -> bool {
        matches!(self, TargetState::Override(_))
    }

    /// Resolve the effective target voltage
    ///
    /// `preset` is only called when no override is set, so the
    /// configuration lock is not taken needlessly.
    pub fn resolve<F>(&self, preset: F) -> f32
    where
        F: FnOnce() -> ConverterPreset,
    {
        match *self {
            TargetState::Override(v) => v,
            TargetState::NoOverride => preset().preset_v,
        }
    }
}
