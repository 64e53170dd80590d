//! Shared power configuration
//!
//! The power configuration is read by the converter and written by the
//! persistence path, so it lives behind a blocking mutex. Every access is a
//! short critical section: copy the fields out (or apply a small update)
//! and release.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use powerbox_core::config::{ConverterPreset, PowerConfig};
use powerbox_core::traits::{PresetSource, PresetStore};

/// Lock-guarded power configuration
///
/// Usable as a `static` with a `CriticalSectionRawMutex` on the target, or
/// with a `NoopRawMutex` when only one context touches it.
pub struct SharedConfig<M: RawMutex> {
    inner: Mutex<M, RefCell<PowerConfig>>,
}

impl<M: RawMutex> SharedConfig<M> {
    /// Create a shared configuration holding `config`
    pub const fn new(config: PowerConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(config)),
        }
    }

    /// Replace the whole configuration (e.g. after loading from flash)
    pub fn replace(&self, config: PowerConfig) {
        self.inner.lock(|cell| *cell.borrow_mut() = config);
    }

    /// Apply `f` to the configuration under the lock
    ///
    /// `f` must not touch this `SharedConfig` again.
    pub fn update<R>(&self, f: impl FnOnce(&mut PowerConfig) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl<M: RawMutex> PresetSource for SharedConfig<M> {
    fn snapshot(&self) -> ConverterPreset {
        self.inner.lock(|config| config.borrow().preset())
    }
}

impl<M: RawMutex> PresetStore for SharedConfig<M> {
    fn store_preset(&self, preset_v: f32, startup_enabled: bool) -> PowerConfig {
        self.update(|config| {
            config.set_preset(preset_v, startup_enabled);
            *config
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_snapshot_reads_both_fields() {
        let shared = SharedConfig::<NoopRawMutex>::new(PowerConfig::with_preset(12.0, true));
        let preset = shared.snapshot();
        assert_eq!(preset.preset_v, 12.0);
        assert!(preset.startup_enabled);
    }

    #[test]
    fn test_update_is_visible_to_readers() {
        let shared = SharedConfig::<NoopRawMutex>::new(PowerConfig::new());

        shared.update(|config| config.set_preset(9.0, true));
        assert_eq!(shared.preset_voltage(), 9.0);
        assert!(shared.startup_enabled());

        shared.replace(PowerConfig::with_preset(3.3, false));
        assert_eq!(shared.preset_voltage(), 3.3);
        assert!(!shared.startup_enabled());
    }

    #[test]
    fn test_store_preset_returns_full_record() {
        let shared = SharedConfig::<NoopRawMutex>::new(PowerConfig::new());

        let saved = shared.store_preset(12.0, true);
        assert!(saved.is_valid());
        assert_eq!(saved.preset(), shared.snapshot());
        assert_eq!(shared.preset_voltage(), 12.0);
    }

    #[test]
    fn test_update_returns_value() {
        let shared = SharedConfig::<NoopRawMutex>::new(PowerConfig::new());
        let old = shared.update(|config| {
            let old = config.preset_v;
            config.preset_v = 7.0;
            old
        });
        assert_eq!(old, PowerConfig::new().preset_v);
        assert_eq!(shared.preset_voltage(), 7.0);
    }
}
