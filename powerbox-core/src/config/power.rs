//! Persisted power configuration
//!
//! The preset voltage and the "power on at startup" flag for the adjustable
//! converter. Stored in flash as postcard with a magic/version header and a
//! CRC so a torn or stale record falls back to defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Magic number to identify valid power configuration ("PWRC")
pub const POWER_CONFIG_MAGIC: u32 = 0x5057_5243;

/// Current power configuration version
pub const POWER_CONFIG_VERSION: u8 = 1;

/// Preset voltage used when nothing valid is stored (V)
pub const DEFAULT_PRESET_V: f32 = 5.0;

/// Upper bound of the encoded size in bytes
pub const MAX_ENCODED_SIZE: usize = 32;

/// Errors encoding or decoding a stored configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Invalid magic or version
    InvalidFormat,
    /// CRC check failed
    CrcMismatch,
}

/// Immutable snapshot of the two fields the converter reads
///
/// Taken under the configuration lock and released immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConverterPreset {
    /// Preset output voltage (V)
    pub preset_v: f32,
    /// Whether the converter is switched on at boot
    pub startup_enabled: bool,
}

/// Power configuration stored in flash
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Adjustable converter preset voltage (V)
    pub preset_v: f32,
    /// Switch the adjustable converter on at boot
    pub startup_enabled: bool,
    /// CRC32 checksum (calculated over magic..startup_enabled)
    pub crc: u32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerConfig {
    /// Create the default configuration (5.0 V preset, off at boot)
    pub const fn new() -> Self {
        Self::with_preset(DEFAULT_PRESET_V, false)
    }

    /// Create a configuration with the given preset
    pub const fn with_preset(preset_v: f32, startup_enabled: bool) -> Self {
        Self {
            magic: POWER_CONFIG_MAGIC,
            version: POWER_CONFIG_VERSION,
            preset_v,
            startup_enabled,
            crc: 0,
        }
    }

    /// Snapshot of the converter fields
    pub const fn preset(&self) -> ConverterPreset {
        ConverterPreset {
            preset_v: self.preset_v,
            startup_enabled: self.startup_enabled,
        }
    }

    /// Replace the converter preset
    pub fn set_preset(&mut self, preset_v: f32, startup_enabled: bool) {
        self.preset_v = preset_v;
        self.startup_enabled = startup_enabled;
    }

    /// Check if the header is valid (magic and version match)
    pub fn is_valid(&self) -> bool {
        self.magic == POWER_CONFIG_MAGIC && self.version == POWER_CONFIG_VERSION
    }

    /// Calculate CRC32 for the data (excluding the crc field itself)
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFF_FFFF;
        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);
        crc = crc32_update(crc, &self.preset_v.to_bits().to_le_bytes());
        crc = crc32_update(crc, &[self.startup_enabled as u8]);
        !crc
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Serialize into `buffer`, refreshing the CRC first
    ///
    /// Returns the used part of the buffer.
    #[cfg(feature = "serde")]
    pub fn encode<'b>(&mut self, buffer: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        self.update_crc();
        postcard::to_slice(self, buffer).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize and validate a stored record
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: PowerConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

        if !config.is_valid() {
            return Err(ConfigError::InvalidFormat);
        }
        if !config.verify_crc() {
            return Err(ConfigError::CrcMismatch);
        }

        Ok(config)
    }
}

/// CRC32 update (IEEE 802.3 polynomial, reflected)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PowerConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.preset_v, DEFAULT_PRESET_V);
        assert!(!config.startup_enabled);
    }

    #[test]
    fn test_crc32_check_value() {
        // Standard CRC-32 check value for "123456789"
        assert_eq!(!crc32_update(0xFFFF_FFFF, b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_crc_detects_modification() {
        let mut config = PowerConfig::with_preset(12.0, true);
        config.update_crc();
        assert!(config.verify_crc());

        config.preset_v = 13.0;
        assert!(!config.verify_crc());
    }

    /// Flash record encoding, built with `--features serde`
    #[cfg(feature = "serde")]
    mod encoding {
        use super::*;

        #[test]
        fn test_encode_decode() {
            let mut config = PowerConfig::with_preset(9.5, true);
            let mut buffer = [0u8; MAX_ENCODED_SIZE];
            let len = config.encode(&mut buffer).unwrap().len();

            let decoded = PowerConfig::decode(&buffer[..len]).unwrap();
            assert_eq!(decoded.preset(), config.preset());
            assert_eq!(decoded.crc, config.crc);
        }

        #[test]
        fn test_decode_rejects_bad_crc() {
            let mut config = PowerConfig::with_preset(9.5, false);
            config.update_crc();
            config.crc ^= 1;

            let mut buffer = [0u8; MAX_ENCODED_SIZE];
            let bytes = postcard::to_slice(&config, &mut buffer).unwrap();
            assert_eq!(PowerConfig::decode(bytes), Err(ConfigError::CrcMismatch));
        }

        #[test]
        fn test_decode_rejects_wrong_version() {
            let mut config = PowerConfig::new();
            config.version = POWER_CONFIG_VERSION + 1;
            config.update_crc();

            let mut buffer = [0u8; MAX_ENCODED_SIZE];
            let bytes = postcard::to_slice(&config, &mut buffer).unwrap();
            assert_eq!(PowerConfig::decode(bytes), Err(ConfigError::InvalidFormat));
        }

        #[test]
        fn test_decode_rejects_garbage() {
            assert_eq!(PowerConfig::decode(&[]), Err(ConfigError::Deserialize));
        }

        #[test]
        fn test_encode_rejects_small_buffer() {
            let mut config = PowerConfig::new();
            let mut buffer = [0u8; 2];
            assert_eq!(config.encode(&mut buffer), Err(ConfigError::Serialize));
        }
    }
}
