//! Inter-task communication channels
//!
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use powerbox_core::state::ConverterStatus;
use powerbox_protocol::{Request, RequestError};

/// Channel capacity for converter requests
const CONVERTER_CHANNEL_SIZE: usize = 4;

/// Requests for the adjustable converter (from the host link)
pub static CONVERTER_CMD: Channel<CriticalSectionRawMutex, Request, CONVERTER_CHANNEL_SIZE> =
    Channel::new();

/// Converter status (published by the converter task after every request)
pub static CONVERTER_STATUS: Signal<CriticalSectionRawMutex, ConverterStatus> = Signal::new();

/// Rejected host request, answered by the host TX task
pub static HOST_ERROR: Signal<CriticalSectionRawMutex, RequestError> = Signal::new();
