//! The generic property-list value tree.
//!
//! This is the loosely typed layer between the XML text and the typed
//! document model. Integers and reals keep their textual form: property-list
//! scalars are untyped in practice (a width may be written as `<integer>` in
//! one file and `<real>` or `<string>` in another), so numbers are parsed by
//! the consumer that knows what it expects.

use std::fmt;

use indexmap::IndexMap;

/// A dictionary in document order.
pub type Dict = IndexMap<String, Value>;

/// One node of a decoded property list.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    /// The text of an `<integer>` or `<real>` element.
    Number(String),
    Bool(bool),
    /// The text of a `<date>` element.
    Date(String),
    /// The base64 text of a `<data>` element, whitespace removed.
    Data(String),
    Array(Vec<Value>),
    Dict(Dict),
}

impl Value {
    /// The textual form of a scalar.
    ///
    /// Strings, numbers, dates and data all have one. Booleans read as
    /// `YES`/`NO` the way graffle writes its flags.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Number(s) | Self::Date(s) | Self::Data(s) => Some(s),
            Self::Bool(true) => Some("YES"),
            Self::Bool(false) => Some("NO"),
            Self::Array(_) | Self::Dict(_) => None,
        }
    }

    /// Parses the scalar text as a float.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_str()?.trim().parse().ok()
    }

    /// Parses the scalar text as an integer, accepting integral reals such
    /// as `2.0`.
    pub fn as_i64(&self) -> Option<i64> {
        let text = self.as_str()?.trim();
        text.parse().ok().or_else(|| {
            text.parse::<f64>()
                .ok()
                .filter(|v| v.fract() == 0.0 && v.is_finite())
                .map(|v| v as i64)
        })
    }

    /// Reads a graffle flag: `<true/>`, `YES`, or a non-zero number.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::String(s) | Self::Number(s) => match s.trim() {
                "YES" | "yes" | "true" => Some(true),
                "NO" | "no" | "false" => Some(false),
                other => other.parse::<f64>().ok().map(|v| v != 0.0),
            },
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a dict.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// The property-list element name this value was decoded from.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Date(_) => "date",
            Self::Data(_) => "data",
            Self::Array(_) => "array",
            Self::Dict(_) => "dict",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(items) => write!(f, "array of {}", items.len()),
            Self::Dict(dict) => write!(f, "dict of {}", dict.len()),
            scalar => f.write_str(scalar.as_str().unwrap_or_default()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
