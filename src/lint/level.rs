use crate::{Error, Result};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// Severity of a rule. Serialized as its numeric form (0, 1, 2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ErrorLevel {
    #[default]
    #[display("off")]
    Off = 0,
    #[display("warning")]
    Warn = 1,
    #[display("error")]
    Error = 2,
}

impl ErrorLevel {
    pub fn is_off(self) -> bool {
        self == ErrorLevel::Off
    }

    /// Accepts `"off" | "warning" | "error"` or `0 | 1 | 2`.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => s.parse(),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(ErrorLevel::Off),
                Some(1) => Ok(ErrorLevel::Warn),
                Some(2) => Ok(ErrorLevel::Error),
                _ => Err(Error::Config(format!("unknown error level: {n}"))),
            },
            other => Err(Error::Config(format!("unknown error level: {other}"))),
        }
    }
}

impl FromStr for ErrorLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "off" => Ok(ErrorLevel::Off),
            "warning" => Ok(ErrorLevel::Warn),
            "error" => Ok(ErrorLevel::Error),
            other => Err(Error::Config(format!("unknown error level: {other}"))),
        }
    }
}

impl Serialize for ErrorLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("off"), ErrorLevel::Off)]
    #[case(json!("warning"), ErrorLevel::Warn)]
    #[case(json!("error"), ErrorLevel::Error)]
    #[case(json!(0), ErrorLevel::Off)]
    #[case(json!(1), ErrorLevel::Warn)]
    #[case(json!(2), ErrorLevel::Error)]
    fn parses_levels(#[case] raw: Value, #[case] expected: ErrorLevel) {
        assert_eq!(ErrorLevel::from_value(&raw).expect("valid level"), expected);
    }

    #[rstest]
    #[case(json!("fatal"))]
    #[case(json!("Error"))]
    #[case(json!(3))]
    #[case(json!(-1))]
    #[case(json!(true))]
    fn rejects_unknown_levels(#[case] raw: Value) {
        assert!(matches!(ErrorLevel::from_value(&raw), Err(Error::Config(_))));
    }

    #[test]
    fn serializes_as_number_and_displays_as_word() {
        assert_eq!(serde_json::to_string(&ErrorLevel::Warn).expect("serialize"), "1");
        assert_eq!(ErrorLevel::Error.to_string(), "error");
        assert_eq!(ErrorLevel::Warn.to_string(), "warning");
    }
}
