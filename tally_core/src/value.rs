// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar cell values.

use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

/// A single table cell.
///
/// Text uses `Arc<str>` so grouping and filtering can clone keys without copying bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A missing value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A float. `NaN` marks an undefined numeric result (e.g. the std of one sample).
    Float(f64),
    /// Text.
    Text(Arc<str>),
    /// A calendar date.
    Date(NaiveDate),
}

/// Type tag for [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`].
    Null,
    /// [`Value::Bool`].
    Bool,
    /// [`Value::Int`].
    Int,
    /// [`Value::Float`].
    Float,
    /// [`Value::Text`].
    Text,
    /// [`Value::Date`].
    Date,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Date => "date",
        })
    }
}

impl Value {
    /// Builds a text value.
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Self::Text(s.into())
    }

    /// Returns the type tag.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Date(_) => ValueKind::Date,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `Null` and for `NaN` floats.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of `Int` and `Float` values.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(v) => Some(v as f64),
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the integer payload of an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the text payload of a `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Exact equality without coercion: `Int(2023)` never equals `Float(2023.0)` or
    /// `Text("2023")`, and `NaN` equals nothing.
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            _ => false,
        }
    }

    /// Orders two values of comparable kinds.
    ///
    /// Numbers compare with numbers (`Int` and `Float` mix), text with text, dates with dates,
    /// booleans with booleans. Anything else, or a `NaN`, yields `None`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            _ => self.as_f64()?.partial_cmp(&other.as_f64()?),
        }
    }

    /// Renders the value for a table cell, printing floats with `decimals` fraction digits.
    pub fn to_cell_string(&self, decimals: usize) -> String {
        match self {
            Self::Float(v) if v.is_nan() => String::from("NaN"),
            Self::Float(v) => format!("{v:.decimals$}"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) if v.is_nan() => f.write_str("NaN"),
            Self::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v.into())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Value::Int(2023), Value::Int(2023), true)]
    #[case(Value::Int(2023), Value::Float(2023.0), false)]
    #[case(Value::Int(2023), Value::text("2023"), false)]
    #[case(Value::Float(f64::NAN), Value::Float(f64::NAN), false)]
    #[case(Value::text("Alice"), Value::text("Alice"), true)]
    fn strict_eq_never_coerces(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
        assert_eq!(a.strict_eq(&b), expected, "{a:?} vs {b:?}");
    }

    #[test]
    fn compare_mixes_numbers_but_not_text() {
        assert_eq!(
            Value::Int(2).compare(&Value::Float(2.5)),
            Some(Ordering::Less),
            "int and float are both numeric"
        );
        assert_eq!(Value::Int(2).compare(&Value::text("2")), None, "no coercion");
        assert_eq!(Value::Float(f64::NAN).compare(&Value::Int(1)), None, "NaN is unordered");
    }

    #[test]
    fn display_matches_tabular_conventions() {
        assert_eq!(Value::Float(3970.0).to_string(), "3970.0");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Null.to_string(), "");
        let d = NaiveDate::from_ymd_opt(2023, 4, 12).expect("valid date");
        assert_eq!(Value::Date(d).to_string(), "2023-04-12");
        assert_eq!(Value::Float(1323.333_333).to_cell_string(2), "1323.33");
    }
}
