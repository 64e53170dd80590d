//! Board pin assignments
//!
//! Reference power box board (RP2040, 2 MB flash).

/// GPIO driving the adjustable converter's VPWM input (PWM slice 0, output A)
pub const CONVERTER_PWM_GPIO: u8 = 16;

/// PWM slice wired to `CONVERTER_PWM_GPIO`
pub const CONVERTER_PWM_SLICE: u8 = 0;

/// GPIO for the host link UART0 TX
pub const HOST_UART_TX_GPIO: u8 = 0;

/// GPIO for the host link UART0 RX
pub const HOST_UART_RX_GPIO: u8 = 1;
