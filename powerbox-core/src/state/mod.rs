//! Converter state
//!
//! The effective target state (RAM override vs. persisted preset), the
//! commands other firmware tasks send to the converter and the status it
//! reports back.

pub mod command;
pub mod status;
pub mod target;

pub use command::ConverterCommand;
pub use status::ConverterStatus;
pub use target::TargetState;
