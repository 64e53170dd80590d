//! Adjustable converter task
//!
//! Serves host requests against the power control: commands change the
//! output, presets are persisted, and the resulting status is published
//! after every request.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use powerbox_drivers::regulator::{PowerControl, SharedConfig};
use powerbox_hal_rp2040::flash::Rp2040FlashStorage;
use powerbox_hal_rp2040::pwm::Rp2040Pwm;
use powerbox_protocol::Request;

use crate::channels::{CONVERTER_CMD, CONVERTER_STATUS};
use crate::config::save_power_config;

/// Power control as wired on the board
pub type Converter =
    PowerControl<Rp2040Pwm<'static>, &'static SharedConfig<CriticalSectionRawMutex>>;

/// Converter control task
///
/// `converter` must already be started.
#[embassy_executor::task]
pub async fn converter_task(mut converter: Converter, mut storage: Rp2040FlashStorage<'static>) {
    info!(
        "Converter task started, output {}",
        if converter.is_output_on() { "on" } else { "off" }
    );
    CONVERTER_STATUS.signal(converter.status());

    loop {
        match CONVERTER_CMD.receive().await {
            Request::Status => {}
            Request::Command(command) => {
                debug!("Converter command: {:?}", command);

                if let Some(mut config) = converter.handle(command) {
                    if let Err(e) = save_power_config(&mut storage, &mut config).await {
                        warn!("Failed to persist converter preset: {:?}", e);
                    }
                }
            }
        }

        CONVERTER_STATUS.signal(converter.status());
    }
}
