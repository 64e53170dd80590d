//! Powerbox - Adjustable Converter Firmware
//!
//! Main firmware binary for RP2040-based power boxes. Drives the
//! PWM-programmed adjustable converter from a persisted preset or a
//! RAM-only override, corrected through the calibration table, and takes
//! its commands from a host over UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use powerbox_core::config::{PowerConfig, RegulatorConfig};
use powerbox_drivers::regulator::{PowerControl, SharedConfig, VoltageController};
use powerbox_hal_rp2040::flash::Rp2040FlashStorage;
use powerbox_hal_rp2040::pwm::Rp2040Pwm;

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Power configuration shared between the converter and persistence
///
/// Holds defaults until the flash copy is loaded at boot.
static POWER_CONFIG: SharedConfig<CriticalSectionRawMutex> = SharedConfig::new(PowerConfig::new());

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Powerbox firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load the persisted preset (or defaults)
    let mut storage = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0);
    POWER_CONFIG.replace(config::load_power_config(&mut storage).await);

    // Converter control pin
    // Pin assignment is board-specific (see board.rs)
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());
    info!(
        "Converter PWM on GPIO{} (slice {})",
        board::CONVERTER_PWM_GPIO,
        board::CONVERTER_PWM_SLICE
    );

    let converter = PowerControl::start(VoltageController::new(
        Rp2040Pwm::new(pwm),
        &POWER_CONFIG,
        RegulatorConfig::reference(),
    ));
    let status = converter.status();
    info!(
        "Converter initialized: target={} V, output {}",
        status.target_v,
        if status.output_on { "on" } else { "off" }
    );

    // Setup UART for the host link
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!(
        "Host link on UART0 (TX GPIO{}, RX GPIO{})",
        board::HOST_UART_TX_GPIO,
        board::HOST_UART_RX_GPIO
    );

    spawner.spawn(tasks::converter_task(converter, storage)).unwrap();
    spawner.spawn(tasks::host_rx_task(rx)).unwrap();
    spawner.spawn(tasks::host_tx_task(tx)).unwrap();

    info!("All tasks spawned");
}
