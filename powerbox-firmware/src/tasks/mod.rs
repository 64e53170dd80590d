//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod converter;
pub mod host;

pub use converter::converter_task;
pub use host::{host_rx_task, host_tx_task};
