//! Raw value conversion
//!
//! Turns the raw text of a parsed pair into the scalar type declared by its descriptor.
//! Parsing is locale independent. Numeric conversions never clamp or change width: a value
//! out of range for `Int32` is an error even if it would fit an `Int64`.

use crate::argbind::error::{ConversionError, ConversionFailure};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Optional sign, digits with at most one decimal separator (`.` or `,`), optional exponent.
static FLOAT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+([.,]\d*)?|[.,]\d+)([eE][+-]?\d+)?$").unwrap());

/// Scalar types a slot can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueType {
    String,
    Bool,
    Int32,
    Int64,
    Float,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Float => "float",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(ValueType::String),
            "bool" | "boolean" => Ok(ValueType::Bool),
            "int32" | "int" => Ok(ValueType::Int32),
            "int64" | "long" => Ok(ValueType::Int64),
            "float" | "double" => Ok(ValueType::Float),
            other => Err(format!("Unknown value type: {}", other)),
        }
    }
}

/// A converted value, ready to be written into a slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float(f64),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Bool(_) => ValueType::Bool,
            Value::Int32(_) => ValueType::Int32,
            Value::Int64(_) => ValueType::Int64,
            Value::Float(_) => ValueType::Float,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int32(n) => write!(f, "{}", n),
            Value::Int64(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! impl_try_from_value {
    ($target:ty, $variant:ident) => {
        impl TryFrom<Value> for $target {
            type Error = Value;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

impl_try_from_value!(String, String);
impl_try_from_value!(bool, Bool);
impl_try_from_value!(i32, Int32);
impl_try_from_value!(i64, Int64);
impl_try_from_value!(f64, Float);

/// Convert `raw` into `value_type`.
pub fn convert(raw: &str, value_type: ValueType) -> Result<Value, ConversionError> {
    let converted = match value_type {
        ValueType::String => Ok(Value::String(raw.to_string())),
        ValueType::Bool => convert_bool(raw),
        ValueType::Int32 => raw
            .parse::<i32>()
            .map(Value::Int32)
            .map_err(ConversionFailure::from),
        ValueType::Int64 => raw
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(ConversionFailure::from),
        ValueType::Float => convert_float(raw),
    };

    converted.map_err(|cause| ConversionError {
        raw: raw.to_string(),
        value_type,
        cause,
    })
}

/// `true` / `false`, any case. Nothing else: no `1`, `yes` or `on`.
fn convert_bool(raw: &str) -> Result<Value, ConversionFailure> {
    Ok(Value::Bool(raw.to_ascii_lowercase().parse::<bool>()?))
}

fn convert_float(raw: &str) -> Result<Value, ConversionFailure> {
    if !FLOAT_REGEX.is_match(raw) {
        return Err(ConversionFailure::Malformed {
            expected: "decimal number",
        });
    }
    let value = raw.replace(',', ".").parse::<f64>()?;
    // std saturates to infinity instead of failing
    if !value.is_finite() {
        return Err(ConversionFailure::OutOfRange { expected: "float" });
    }
    Ok(Value::Float(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::IntErrorKind;

    #[test]
    fn test_string_is_identity() {
        assert_eq!(
            convert("Test-:-work", ValueType::String),
            Ok(Value::String("Test-:-work".to_string()))
        );
        assert_eq!(
            convert("", ValueType::String),
            Ok(Value::String(String::new()))
        );
    }

    #[test]
    fn test_bool_is_case_insensitive() {
        assert_eq!(convert("true", ValueType::Bool), Ok(Value::Bool(true)));
        assert_eq!(convert("True", ValueType::Bool), Ok(Value::Bool(true)));
        assert_eq!(convert("FALSE", ValueType::Bool), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_bool_rejects_numbers_and_words() {
        for raw in ["123", "1", "0", "yes", "on", ""] {
            let err = convert(raw, ValueType::Bool).unwrap_err();
            assert_eq!(err.raw, raw);
            assert_eq!(err.value_type, ValueType::Bool);
            assert!(matches!(err.cause, ConversionFailure::Bool(_)));
        }
    }

    #[test]
    fn test_int32_bounds() {
        assert_eq!(
            convert("2147483647", ValueType::Int32),
            Ok(Value::Int32(i32::MAX))
        );
        assert_eq!(convert("-42", ValueType::Int32), Ok(Value::Int32(-42)));
        assert_eq!(convert("+7", ValueType::Int32), Ok(Value::Int32(7)));

        let err = convert("2147483648", ValueType::Int32).unwrap_err();
        match err.cause {
            ConversionFailure::Int(e) => assert_eq!(e.kind(), &IntErrorKind::PosOverflow),
            other => panic!("Expected int failure, got {:?}", other),
        }
    }

    #[test]
    fn test_int64_accepts_large_values() {
        assert_eq!(
            convert("1100200300400", ValueType::Int64),
            Ok(Value::Int64(1_100_200_300_400))
        );
        assert!(convert("1100200300400", ValueType::Int32).is_err());
        assert!(convert("12.5", ValueType::Int64).is_err());
        assert!(convert(" 12", ValueType::Int64).is_err());
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(convert("1.5", ValueType::Float), Ok(Value::Float(1.5)));
        assert_eq!(convert("1,5", ValueType::Float), Ok(Value::Float(1.5)));
        assert_eq!(convert("-2", ValueType::Float), Ok(Value::Float(-2.0)));
        assert_eq!(convert(".25", ValueType::Float), Ok(Value::Float(0.25)));
        assert_eq!(convert("1e3", ValueType::Float), Ok(Value::Float(1000.0)));
        assert_eq!(convert("2.5E-1", ValueType::Float), Ok(Value::Float(0.25)));
    }

    #[test]
    fn test_float_rejects_non_numeric_spellings() {
        for raw in ["NaN", "inf", "infinity", "1.2.3", "1,2.3", "abc", ""] {
            let err = convert(raw, ValueType::Float).unwrap_err();
            assert_eq!(
                err.cause,
                ConversionFailure::Malformed {
                    expected: "decimal number"
                },
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_float_overflow_is_an_error() {
        for raw in ["1e400", "-1e400", "1,5e309"] {
            let err = convert(raw, ValueType::Float).unwrap_err();
            assert_eq!(err.raw, raw);
            assert_eq!(
                err.cause,
                ConversionFailure::OutOfRange { expected: "float" }
            );
        }
        assert_eq!(
            convert("1.7976931348623157e308", ValueType::Float),
            Ok(Value::Float(f64::MAX))
        );
    }

    #[test]
    fn test_value_type_from_str() {
        assert_eq!("Int64".parse::<ValueType>(), Ok(ValueType::Int64));
        assert_eq!("boolean".parse::<ValueType>(), Ok(ValueType::Bool));
        assert!("list".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_try_from_value() {
        assert_eq!(i64::try_from(Value::Int64(5)), Ok(5));
        assert_eq!(bool::try_from(Value::Int64(5)), Err(Value::Int64(5)));
        assert_eq!(
            String::try_from(Value::String("x".to_string())),
            Ok("x".to_string())
        );
    }
}
