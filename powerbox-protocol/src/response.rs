//! Reply encoding
//!
//! Every reply is one JSON object followed by `\n`.

use core::fmt::Write;

use heapless::String;
use powerbox_core::state::ConverterStatus;

use crate::request::RequestError;
use crate::{KEY_OUTPUT, KEY_OVERRIDE, KEY_VOLTAGE};

/// Longest reply line, terminator included
pub const MAX_RESPONSE_LEN: usize = 64;

/// An encoded reply line
pub type Response = String<MAX_RESPONSE_LEN>;

/// Encode a status reply, e.g. `{"adj":1,"adj_v":12.00,"adj_ovr":0}`
///
/// Fails only if the line does not fit `MAX_RESPONSE_LEN`, which takes a
/// target voltage far outside the converter's range.
pub fn status_line(status: &ConverterStatus) -> Result<Response, core::fmt::Error> {
    let mut line = Response::new();
    writeln!(
        line,
        r#"{{"{}":{},"{}":{:.2},"{}":{}}}"#,
        KEY_OUTPUT,
        status.output_on as u8,
        KEY_VOLTAGE,
        status.target_v,
        KEY_OVERRIDE,
        status.overridden as u8,
    )?;
    Ok(line)
}

/// Encode an error reply, e.g. `{"err":"syntax"}`
pub fn error_line(error: RequestError) -> Result<Response, core::fmt::Error> {
    let mut line = Response::new();
    writeln!(line, r#"{{"err":"{}"}}"#, error.as_str())?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let status = ConverterStatus {
            output_on: true,
            target_v: 12.0,
            overridden: false,
        };
        assert_eq!(
            status_line(&status).unwrap().as_str(),
            "{\"adj\":1,\"adj_v\":12.00,\"adj_ovr\":0}\n"
        );
    }

    #[test]
    fn test_status_line_rounds_voltage() {
        let status = ConverterStatus {
            output_on: false,
            target_v: 15.15,
            overridden: true,
        };
        assert_eq!(
            status_line(&status).unwrap().as_str(),
            "{\"adj\":0,\"adj_v\":15.15,\"adj_ovr\":1}\n"
        );
    }

    #[test]
    fn test_error_line() {
        let line = error_line(RequestError::MissingField).unwrap();
        assert_eq!(line.as_str(), "{\"err\":\"missing_field\"}\n");
    }

    #[test]
    fn test_huge_target_does_not_fit() {
        let status = ConverterStatus {
            output_on: true,
            target_v: f32::MAX,
            overridden: true,
        };
        assert!(status_line(&status).is_err());
    }
}
