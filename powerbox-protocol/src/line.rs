//! Line framing
//!
//! Bytes are fed one at a time; a complete line is returned when `\n`
//! arrives. `\r` is dropped so CRLF terminals work too.

use heapless::Vec;

/// Longest accepted request line, without the terminator
pub const MAX_LINE_LEN: usize = 96;

/// A complete request line
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded `MAX_LINE_LEN` and was discarded
    TooLong,
}

/// Accumulates bytes into lines
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    buffer: Line,
    overflowed: bool,
}

impl LineParser {
    /// Create a new line parser
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` at the end of a non-empty line and
    /// `Ok(None)` while more bytes are needed. An overlong line is
    /// reported once, at its terminator; parsing resumes with the next line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match byte {
            b'\n' => {
                let line = core::mem::take(&mut self.buffer);
                if core::mem::take(&mut self.overflowed) {
                    return Err(LineError::TooLong);
                }
                Ok((!line.is_empty()).then_some(line))
            }
            b'\r' => Ok(None),
            _ if self.overflowed => Ok(None),
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                Ok(None)
            }
        }
    }
}
