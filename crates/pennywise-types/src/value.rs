use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Loosely typed value passed to and returned from named calculators.
///
/// Presentation layers often hold amounts as the text the user typed, so
/// `String` is accepted wherever a number is expected and parsed by the
/// calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputValue {
    /// Text, usually a user-typed amount.
    String(String),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Flag.
    Boolean(bool),
    /// Named fields, ordered by key.
    Object(BTreeMap<String, InputValue>),
    /// Absent value.
    Null,
}

impl InputValue {
    /// Numeric view of `Integer` and `Float`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text view of `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Field map view of `Object`.
    pub const fn as_object(&self) -> Option<&BTreeMap<String, InputValue>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Whether this is `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Type name for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Object(_) => "object",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(fl) => write!(f, "{fl}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Object(obj) => {
                let pairs: Vec<String> = obj.iter().map(|(k, v)| format!("\"{k}\": {v}")).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<K: Into<String>> FromIterator<(K, InputValue)> for InputValue {
    fn from_iter<I: IntoIterator<Item = (K, InputValue)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
