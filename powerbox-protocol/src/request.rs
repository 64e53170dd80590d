//! Request parsing

use powerbox_core::state::ConverterCommand;

use crate::line::LineError;
use crate::{KEY_OUTPUT, KEY_STARTUP, KEY_VOLTAGE};

/// A request from the host
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Report the converter status
    Status,
    /// Forward a command to the converter
    Command(ConverterCommand),
}

/// Reasons a request line is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Line exceeded the maximum length
    TooLong,
    /// Line is not valid UTF-8
    InvalidUtf8,
    /// Not a `{"key":value}` object
    Syntax,
    /// Verb other than `get`, `set` or `save`
    UnknownVerb,
    /// Key not known for this verb
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// A required key is missing
    MissingField,
}

impl RequestError {
    /// Short name sent back to the host
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestError::TooLong => "too_long",
            RequestError::InvalidUtf8 => "utf8",
            RequestError::Syntax => "syntax",
            RequestError::UnknownVerb => "unknown_verb",
            RequestError::UnknownKey => "unknown_key",
            RequestError::InvalidValue => "invalid_value",
            RequestError::MissingField => "missing_field",
        }
    }
}

impl From<LineError> for RequestError {
    fn from(e: LineError) -> Self {
        match e {
            LineError::TooLong => RequestError::TooLong,
        }
    }
}

impl Request {
    /// Parse one request line (without terminator)
    pub fn parse(line: &[u8]) -> Result<Self, RequestError> {
        let text = core::str::from_utf8(line).map_err(|_| RequestError::InvalidUtf8)?;
        let (verb, value) = field(object_body(text)?)?;

        match verb {
            "get" => match string(value)? {
                "status" => Ok(Request::Status),
                _ => Err(RequestError::UnknownKey),
            },
            "set" => parse_set(object_body(value)?),
            "save" => parse_save(object_body(value)?),
            _ => Err(RequestError::UnknownVerb),
        }
    }
}

/// `{"adj":0|1}` or `{"adj_v":<volts>}`
fn parse_set(body: &str) -> Result<Request, RequestError> {
    let (key, value) = field(body)?;
    let command = match key {
        KEY_OUTPUT => ConverterCommand::SetOutput(flag(value)?),
        KEY_VOLTAGE => ConverterCommand::SetVoltage(voltage(value)?),
        _ => return Err(RequestError::UnknownKey),
    };
    Ok(Request::Command(command))
}

/// `{"adj_v":<volts>,"adj_on":0|1}`, keys in any order
fn parse_save(body: &str) -> Result<Request, RequestError> {
    let mut preset_v = None;
    let mut startup_enabled = None;

    for item in body.split(',') {
        let (key, value) = field(item)?;
        match key {
            KEY_VOLTAGE => preset_v = Some(voltage(value)?),
            KEY_STARTUP => startup_enabled = Some(flag(value)?),
            _ => return Err(RequestError::UnknownKey),
        }
    }

    match (preset_v, startup_enabled) {
        (Some(voltage), Some(startup_enabled)) => Ok(Request::Command(ConverterCommand::SavePreset {
            voltage,
            startup_enabled,
        })),
        _ => Err(RequestError::MissingField),
    }
}

/// Inside of a `{...}` object, trimmed
fn object_body(text: &str) -> Result<&str, RequestError> {
    text.trim()
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .map(str::trim)
        .ok_or(RequestError::Syntax)
}

/// Split `"key":value` at the first colon
fn field(text: &str) -> Result<(&str, &str), RequestError> {
    let (key, value) = text.split_once(':').ok_or(RequestError::Syntax)?;
    Ok((string(key)?, value.trim()))
}

/// Contents of a quoted string (no escapes)
fn string(text: &str) -> Result<&str, RequestError> {
    text.trim()
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or(RequestError::Syntax)
}

fn flag(value: &str) -> Result<bool, RequestError> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(RequestError::InvalidValue),
    }
}

/// Finite voltage; range limits are applied by the converter
fn voltage(value: &str) -> Result<f32, RequestError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(RequestError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(text: &str) -> Result<Request, RequestError> {
        Request::parse(text.as_bytes())
    }

    #[test]
    fn test_get_status() {
        assert_eq!(parse(r#"{"get":"status"}"#), Ok(Request::Status));
        assert_eq!(parse(r#" { "get" : "status" } "#), Ok(Request::Status));
        assert_eq!(parse(r#"{"get":"config"}"#), Err(RequestError::UnknownKey));
    }

    #[test]
    fn test_set_output() {
        assert_eq!(
            parse(r#"{"set":{"adj":1}}"#),
            Ok(Request::Command(ConverterCommand::SetOutput(true)))
        );
        assert_eq!(
            parse(r#"{"set":{"adj":false}}"#),
            Ok(Request::Command(ConverterCommand::SetOutput(false)))
        );
        assert_eq!(parse(r#"{"set":{"adj":2}}"#), Err(RequestError::InvalidValue));
    }

    #[test]
    fn test_set_voltage() {
        assert_eq!(
            parse(r#"{"set":{"adj_v":9.5}}"#),
            Ok(Request::Command(ConverterCommand::SetVoltage(9.5)))
        );
        // Out-of-range values pass through; the converter clamps them
        assert_eq!(
            parse(r#"{"set":{"adj_v":-3}}"#),
            Ok(Request::Command(ConverterCommand::SetVoltage(-3.0)))
        );
        assert_eq!(parse(r#"{"set":{"adj_v":NaN}}"#), Err(RequestError::InvalidValue));
        assert_eq!(parse(r#"{"set":{"adj_v":"9"}}"#), Err(RequestError::InvalidValue));
    }

    #[test]
    fn test_save_preset() {
        let expected = Ok(Request::Command(ConverterCommand::SavePreset {
            voltage: 12.0,
            startup_enabled: true,
        }));
        assert_eq!(parse(r#"{"save":{"adj_v":12.0,"adj_on":1}}"#), expected);
        assert_eq!(parse(r#"{"save":{"adj_on":true, "adj_v":12}}"#), expected);
    }

    #[test]
    fn test_save_requires_both_fields() {
        assert_eq!(
            parse(r#"{"save":{"adj_v":12.0}}"#),
            Err(RequestError::MissingField)
        );
        assert_eq!(
            parse(r#"{"save":{"adj_v":12.0,"d1":1}}"#),
            Err(RequestError::UnknownKey)
        );
    }

    #[test]
    fn test_malformed_requests() {
        assert_eq!(parse("status"), Err(RequestError::Syntax));
        assert_eq!(parse("{}"), Err(RequestError::Syntax));
        assert_eq!(parse(r#"{"set":1}"#), Err(RequestError::Syntax));
        assert_eq!(parse(r#"{"reboot":1}"#), Err(RequestError::UnknownVerb));
        assert_eq!(parse(r#"{"set":{"d1":1}}"#), Err(RequestError::UnknownKey));
        assert_eq!(Request::parse(&[0x7B, 0xFF, 0x7D]), Err(RequestError::InvalidUtf8));
    }

    #[test]
    fn test_line_error_maps_to_request_error() {
        assert_eq!(RequestError::from(LineError::TooLong), RequestError::TooLong);
        assert_eq!(RequestError::TooLong.as_str(), "too_long");
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
            let _ = Request::parse(&bytes);
        }

        #[test]
        fn prop_set_voltage_accepts_finite(v in -100.0f32..100.0) {
            let line = format!(r#"{{"set":{{"adj_v":{}}}}}"#, v);
            prop_assert_eq!(
                Request::parse(line.as_bytes()),
                Ok(Request::Command(ConverterCommand::SetVoltage(v)))
            );
        }
    }
}
