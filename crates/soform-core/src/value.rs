//! Dynamic values exchanged between beans and widgets

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used when a date travels as text (JSON, plain strings)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Declared type of a member, used for widget selection and setter pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Accepts any value; setters declared with it pair with every getter
    Any,
    Bool,
    Int,
    Float,
    String,
    Date,
    /// Pre-rendered HTML; grids route such members to the HTML renderer
    Html,
    List,
}

impl ValueType {
    /// Returns the name of this type (for messages)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Any => "Any",
            ValueType::Bool => "Bool",
            ValueType::Int => "Int",
            ValueType::Float => "Float",
            ValueType::String => "String",
            ValueType::Date => "Date",
            ValueType::Html => "Html",
            ValueType::List => "List",
        }
    }

    /// Whether a setter taking `self` can accept what a getter returning
    /// `other` produces
    #[must_use]
    pub fn is_assignable_from(self, other: ValueType) -> bool {
        self == other || self == ValueType::Any
    }

    /// Numeric types are right-aligned in grids
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, ValueType::Int | ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value read from a getter, shown by a widget or written through a setter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    /// Markup that is rendered as-is instead of being escaped
    Html(String),
    List(Vec<Value>),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Create an HTML value
    pub fn html(s: impl Into<String>) -> Self {
        Value::Html(s.into())
    }

    /// Returns true if this value is null
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null, the empty string and the empty list count as "no value"
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) | Value::Html(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns the type name of this value (for error messages)
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Date(_) => "Date",
            Value::Html(_) => "Html",
            Value::List(_) => "List",
        }
    }

    /// The declared type this value belongs to, `None` for null
    #[must_use]
    pub const fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueType::Bool),
            Value::Int(_) => Some(ValueType::Int),
            Value::Float(_) => Some(ValueType::Float),
            Value::String(_) => Some(ValueType::String),
            Value::Date(_) => Some(ValueType::Date),
            Value::Html(_) => Some(ValueType::Html),
            Value::List(_) => Some(ValueType::List),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Html(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Integers widen to floats
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Convert this value so that it fits a member of type `target`
    ///
    /// Null converts to every type. Text is parsed for numbers, booleans
    /// and ISO dates; blank text becomes null. Returns `None` when no
    /// sensible conversion exists.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn coerce_to(&self, target: ValueType) -> Option<Value> {
        if target == ValueType::Any || self.is_null() {
            return Some(self.clone());
        }
        if self.value_type() == Some(target) {
            return Some(self.clone());
        }
        match (target, self) {
            (ValueType::String, Value::List(_)) => None,
            (ValueType::String, other) => Some(Value::String(other.to_string())),
            (ValueType::Html, Value::String(s)) => Some(Value::Html(s.clone())),
            (ValueType::Int, Value::Float(f)) if f.fract() == 0.0 && fits_i64(*f) => {
                Some(Value::Int(*f as i64))
            }
            (ValueType::Float, Value::Int(n)) => Some(Value::Float(*n as f64)),
            (_, Value::String(s)) => parse_text(s.trim(), target),
            _ => None,
        }
    }

    /// Convert from JSON; strings stay strings even when they look like dates
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(_) => Value::String(json.to_string()),
        }
    }

    /// Convert to JSON; dates become ISO strings
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) | Value::Html(s) => serde_json::Value::String(s.clone()),
            Value::Date(d) => serde_json::Value::String(d.format(ISO_DATE_FORMAT).to_string()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

/// Whole floats in `[-2^63, 2^63)` convert to `i64` without saturating
fn fits_i64(f: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (-LIMIT..LIMIT).contains(&f)
}

fn parse_text(text: &str, target: ValueType) -> Option<Value> {
    if text.is_empty() {
        return Some(Value::Null);
    }
    match target {
        ValueType::Int => text.parse().ok().map(Value::Int),
        ValueType::Float => text.parse().ok().map(Value::Float),
        ValueType::Bool => match text.to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(Value::Bool(true)),
            "false" | "no" => Some(Value::Bool(false)),
            _ => None,
        },
        ValueType::Date => NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
            .ok()
            .map(Value::Date),
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) | Value::Html(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(ISO_DATE_FORMAT)),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_emptiness() {
        assert!(Value::Null.is_empty());
        assert!(Value::string("").is_empty());
        assert!(Value::List(vec![]).is_empty());
        assert!(!Value::Int(0).is_empty());
        assert!(!Value::Bool(false).is_empty());
    }

    #[test]
    fn test_coerce_text_to_numbers() {
        assert_eq!(Value::string(" 42 ").coerce_to(ValueType::Int), Some(Value::Int(42)));
        assert_eq!(
            Value::string("2.5").coerce_to(ValueType::Float),
            Some(Value::Float(2.5))
        );
        assert_eq!(Value::string("").coerce_to(ValueType::Int), Some(Value::Null));
        assert_eq!(Value::string("abc").coerce_to(ValueType::Int), None);
    }

    #[test]
    fn test_coerce_between_numbers() {
        assert_eq!(Value::Int(3).coerce_to(ValueType::Float), Some(Value::Float(3.0)));
        assert_eq!(Value::Float(3.0).coerce_to(ValueType::Int), Some(Value::Int(3)));
        assert_eq!(Value::Float(3.5).coerce_to(ValueType::Int), None);
    }

    #[test]
    fn test_coerce_out_of_range_float_to_int() {
        assert_eq!(Value::Float(1e30).coerce_to(ValueType::Int), None);
        assert_eq!(Value::Float(-1e30).coerce_to(ValueType::Int), None);
        assert_eq!(Value::Float(f64::INFINITY).coerce_to(ValueType::Int), None);
        assert_eq!(
            Value::Float(9.2e18).coerce_to(ValueType::Int),
            Some(Value::Int(9_200_000_000_000_000_000))
        );
        assert_eq!(
            Value::Float(-9_223_372_036_854_775_808.0).coerce_to(ValueType::Int),
            Some(Value::Int(i64::MIN))
        );
    }

    #[test]
    fn test_coerce_dates_and_booleans() {
        assert_eq!(
            Value::string("2024-02-29").coerce_to(ValueType::Date),
            Some(Value::Date(date(2024, 2, 29)))
        );
        assert_eq!(Value::string("Yes").coerce_to(ValueType::Bool), Some(Value::Bool(true)));
        assert_eq!(
            Value::Date(date(2024, 1, 5)).coerce_to(ValueType::String),
            Some(Value::string("2024-01-05"))
        );
    }

    #[test]
    fn test_null_and_any_pass_through() {
        assert_eq!(Value::Null.coerce_to(ValueType::Date), Some(Value::Null));
        let list = Value::List(vec![Value::Int(1)]);
        assert_eq!(list.coerce_to(ValueType::Any), Some(list.clone()));
        assert_eq!(list.coerce_to(ValueType::String), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::string("a")]).to_string(),
            "1, a"
        );
        assert_eq!(Value::Date(date(2020, 12, 31)).to_string(), "2020-12-31");
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({"n": 1, "f": 1.5, "s": "x", "l": [true, null]});
        assert_eq!(Value::from_json(&json["n"]), Value::Int(1));
        assert_eq!(Value::from_json(&json["f"]), Value::Float(1.5));
        assert_eq!(
            Value::from_json(&json["l"]),
            Value::List(vec![Value::Bool(true), Value::Null])
        );
        assert_eq!(
            Value::Date(date(2021, 3, 4)).to_json(),
            serde_json::json!("2021-03-04")
        );
    }

    #[test]
    fn test_assignability() {
        assert!(ValueType::Any.is_assignable_from(ValueType::Date));
        assert!(ValueType::Int.is_assignable_from(ValueType::Int));
        assert!(!ValueType::Int.is_assignable_from(ValueType::Float));
        assert!(ValueType::Float.is_numeric());
        assert!(!ValueType::String.is_numeric());
    }
}
