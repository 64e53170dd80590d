//! Persisted preset access

use crate::config::{ConverterPreset, PowerConfig};

/// Source of the persisted converter preset
///
/// The configuration is shared with other subsystems, so implementations
/// take their lock for the duration of a single snapshot and release it
/// before returning. Reads are expected to succeed promptly.
pub trait PresetSource {
    /// Read the preset voltage and startup flag in one critical section
    fn snapshot(&self) -> ConverterPreset;

    /// Read the preset voltage (V)
    fn preset_voltage(&self) -> f32 {
        self.snapshot().preset_v
    }

    /// Read the "power on at startup" flag
    fn startup_enabled(&self) -> bool {
        self.snapshot().startup_enabled
    }
}

impl<T: PresetSource + ?Sized> PresetSource for &T {
    fn snapshot(&self) -> ConverterPreset {
        (**self).snapshot()
    }
}

impl PresetSource for ConverterPreset {
    fn snapshot(&self) -> ConverterPreset {
        *self
    }
}

/// Preset source that can also be written
///
/// Writes change the shared configuration only; persisting the returned
/// record to flash is up to the caller.
pub trait PresetStore: PresetSource {
    /// Replace the preset and return the whole configuration to persist
    fn store_preset(&self, preset_v: f32, startup_enabled: bool) -> PowerConfig;
}

impl<T: PresetStore + ?Sized> PresetStore for &T {
    fn store_preset(&self, preset_v: f32, startup_enabled: bool) -> PowerConfig {
        (**self).store_preset(preset_v, startup_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_preset_source() {
        let preset = ConverterPreset {
            preset_v: 12.0,
            startup_enabled: true,
        };

        fn read<S: PresetSource>(source: S) -> (f32, bool) {
            (source.preset_voltage(), source.startup_enabled())
        }

        assert_eq!(read(preset), (12.0, true));
        assert_eq!(read(&preset), (12.0, true));
    }

    struct CellStore(core::cell::Cell<PowerConfig>);

    impl PresetSource for CellStore {
        fn snapshot(&self) -> ConverterPreset {
            self.0.get().preset()
        }
    }

    impl PresetStore for CellStore {
        fn store_preset(&self, preset_v: f32, startup_enabled: bool) -> PowerConfig {
            let mut config = self.0.get();
            config.set_preset(preset_v, startup_enabled);
            self.0.set(config);
            config
        }
    }

    #[test]
    fn test_store_through_reference() {
        let store = CellStore(core::cell::Cell::new(PowerConfig::new()));

        fn save<S: PresetStore>(store: S) -> PowerConfig {
            store.store_preset(9.0, true)
        }

        let saved = save(&store);
        assert_eq!(saved.preset_v, 9.0);
        assert_eq!(store.snapshot(), saved.preset());
    }
}
