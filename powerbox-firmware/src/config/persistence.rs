//! Power configuration persistence
//!
//! Loads and saves the converter preset to flash storage. A missing or
//! damaged record falls back to defaults so the board always boots.

use defmt::*;

use powerbox_core::config::{ConfigError, PowerConfig, MAX_ENCODED_SIZE};
use powerbox_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey};
use powerbox_hal_rp2040::FlashStorageTrait;

/// Persistence errors
#[derive(Debug, Clone, Copy, defmt::Format)]
pub enum PersistError {
    /// Flash operation failed
    Flash(FlashError),
    /// Encoding or validation failed
    Config(ConfigError),
}

impl From<FlashError> for PersistError {
    fn from(e: FlashError) -> Self {
        PersistError::Flash(e)
    }
}

impl From<ConfigError> for PersistError {
    fn from(e: ConfigError) -> Self {
        PersistError::Config(e)
    }
}

/// Load the power configuration from flash
///
/// Returns the stored configuration, or defaults if nothing valid is stored.
pub async fn load_power_config(storage: &mut Rp2040FlashStorage<'_>) -> PowerConfig {
    match load_inner(storage).await {
        Ok(config) => {
            info!(
                "Loaded power config: preset={} V, startup={}",
                config.preset_v, config.startup_enabled
            );
            config
        }
        Err(PersistError::Flash(FlashError::NotFound)) => {
            debug!("No power config in flash, using defaults");
            PowerConfig::new()
        }
        Err(e) => {
            warn!("Failed to load power config: {:?}, using defaults", e);
            PowerConfig::new()
        }
    }
}

async fn load_inner(storage: &mut Rp2040FlashStorage<'_>) -> Result<PowerConfig, PersistError> {
    let mut buffer = [0u8; MAX_ENCODED_SIZE];
    let len = storage.read(StorageKey::PowerConfig, &mut buffer).await?;

    debug!("Read {} bytes of power config from flash", len);

    Ok(PowerConfig::decode(&buffer[..len])?)
}

/// Save the power configuration to flash
///
/// Updates the CRC before saving.
pub async fn save_power_config(
    storage: &mut Rp2040FlashStorage<'_>,
    config: &mut PowerConfig,
) -> Result<(), PersistError> {
    let mut buffer = [0u8; MAX_ENCODED_SIZE];
    let bytes = config.encode(&mut buffer)?;

    debug!("Saving {} bytes of power config to flash", bytes.len());
    storage.write(StorageKey::PowerConfig, bytes).await?;

    info!(
        "Saved power config: preset={} V, startup={}",
        config.preset_v, config.startup_enabled
    );
    Ok(())
}
