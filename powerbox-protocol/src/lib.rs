//! Host serial protocol
//!
//! The power box is driven from a host (an ASCOM/Alpaca proxy or a plain
//! terminal) over a UART. Requests and replies are single-line JSON
//! objects terminated by `\n`, using the short switch keys of the host
//! software:
//!
//! ```text
//! → {"get":"status"}
//! → {"set":{"adj":1}}                    output on (0 = off)
//! → {"set":{"adj_v":9.0}}                RAM-only target voltage
//! → {"save":{"adj_v":12.0,"adj_on":1}}   persisted preset + startup flag
//! ← {"adj":1,"adj_v":9.00,"adj_ovr":1}
//! ← {"err":"syntax"}
//! ```
//!
//! Only this flat subset of JSON is accepted; it is parsed in place
//! without allocation.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod line;
pub mod request;
pub mod response;

pub use line::{Line, LineError, LineParser, MAX_LINE_LEN};
pub use request::{Request, RequestError};
pub use response::{error_line, status_line, Response};

/// Key for the output switch
pub const KEY_OUTPUT: &str = "adj";
/// Key for the target or preset voltage
pub const KEY_VOLTAGE: &str = "adj_v";
/// Key for the "power on at startup" flag
pub const KEY_STARTUP: &str = "adj_on";
/// Key reporting whether a RAM override is in force
pub const KEY_OVERRIDE: &str = "adj_ovr";
