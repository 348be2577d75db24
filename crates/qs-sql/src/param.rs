//! Literal values lifted out of a statement.

use serde::Serialize;
use sqlparser::ast::Value;
use std::fmt;

/// A literal removed from a template, in its native type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Param {
    /// Integer that fits in `i64`; booleans are stored as 1 and 0
    Int(i64),
    /// Integer above `i64::MAX`
    UInt(u64),
    /// Approximate number written with an exponent
    Float(f64),
    /// Exact number written with a fraction, kept as its source text
    Decimal(String),
    /// String literal, unquoted
    Str(String),
    /// `NULL`
    Null,
    /// Placeholder that was already present in the input (`?`, `$1`, `:id`)
    Marker(String),
    /// Other literal kinds (hex, bit, byte strings) in source form
    Raw(String),
}

impl Param {
    /// Convert a front-end literal
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(text, _) => Self::from_number(text),
            Value::SingleQuotedString(s)
            | Value::DoubleQuotedString(s)
            | Value::EscapedStringLiteral(s)
            | Value::NationalStringLiteral(s) => Param::Str(s.clone()),
            Value::DollarQuotedString(s) => Param::Str(s.value.clone()),
            Value::Boolean(b) => Param::Int(i64::from(*b)),
            Value::Null => Param::Null,
            Value::Placeholder(p) => Param::Marker(p.clone()),
            other => Param::Raw(other.to_string()),
        }
    }

    /// Classify numeric text: exponent means float, a fraction means
    /// decimal, anything else is an integer when it fits.
    pub fn from_number(text: &str) -> Self {
        if text.contains(['e', 'E']) {
            return match text.parse::<f64>() {
                Ok(f) => Param::Float(f),
                Err(_) => Param::Decimal(text.to_string()),
            };
        }
        if text.contains('.') {
            return Param::Decimal(text.to_string());
        }
        if let Ok(i) = text.parse::<i64>() {
            Param::Int(i)
        } else if let Ok(u) = text.parse::<u64>() {
            Param::UInt(u)
        } else {
            Param::Decimal(text.to_string())
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Param::Marker(_))
    }
}

impl fmt::Display for Param {
    /// SQL literal form, suitable for substituting back into a template
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Int(i) => write!(f, "{i}"),
            Param::UInt(u) => write!(f, "{u}"),
            Param::Float(x) => write!(f, "{x:e}"),
            Param::Decimal(d) => f.write_str(d),
            Param::Str(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Param::Null => f.write_str("NULL"),
            Param::Marker(m) | Param::Raw(m) => f.write_str(m),
        }
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Str(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Str(value)
    }
}

#[cfg(test)]
#[path = "param_test.rs"]
mod tests;
