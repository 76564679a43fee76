//! The expression value model.
//!
//! Evaluated expressions produce [`Value`]s. Their static types are
//! [`ExprType`]s; every adapted function declares its parameters and result
//! in those terms.

use crate::error::ConversionError;
use core::fmt;
use std::collections::BTreeMap;

/// An evaluated expression value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text.
    String(String),
    /// Any number. Integers are represented exactly up to 2^53.
    Number(f64),
    /// `true` or `false`.
    Bool(bool),
    /// An ordered sequence.
    List(Vec<Value>),
    /// String keyed entries, ordered by key.
    Map(BTreeMap<String, Value>),
}

/// The outermost shape of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::String`]
    String,
    /// [`Value::Number`]
    Number,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::List`]
    List,
    /// [`Value::Map`]
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Map => "map",
        })
    }
}

impl Value {
    /// Returns the outermost shape of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Number(_) => ValueKind::Number,
            Self::Bool(_) => ValueKind::Bool,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }

    /// Converts to a plain JSON value. Non-finite numbers become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Converts from a plain JSON value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] if `json` is or contains `null`, which
    /// has no expression representation.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ConversionError> {
        Ok(match json {
            serde_json::Value::Null => return Err(ConversionError::new("a value", "null")),
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Number(n) => Self::Number(
                n.as_f64()
                    .ok_or_else(|| ConversionError::new("number", n.to_string()))?,
            ),
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect::<Result<_, _>>()?)
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(key, value)| Self::from_json(value).map(|value| (key.clone(), value)))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

/// A type expressible in the expression language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprType {
    /// Text.
    String,
    /// Numbers.
    Number,
    /// Booleans.
    Bool,
    /// Lists whose elements all have the given type.
    List(Box<ExprType>),
    /// Maps whose values all have the given type.
    Map(Box<ExprType>),
}

impl ExprType {
    /// Returns `true` if `value` has this type, checking elements
    /// recursively.
    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_))
            | (Self::Number, Value::Number(_))
            | (Self::Bool, Value::Bool(_)) => true,
            (Self::List(element), Value::List(items)) => {
                items.iter().all(|item| element.admits(item))
            }
            (Self::Map(element), Value::Map(entries)) => {
                entries.values().all(|item| element.admits(item))
            }
            _ => false,
        }
    }

    /// Checks `value` against this type.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] naming this type and the value's kind
    /// when [`admits`](Self::admits) is `false`.
    pub fn check(&self, value: &Value) -> Result<(), ConversionError> {
        if self.admits(value) {
            Ok(())
        } else {
            Err(ConversionError::new(self.to_string(), describe(value)))
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Bool => f.write_str("bool"),
            Self::List(element) => write!(f, "list({element})"),
            Self::Map(element) => write!(f, "map({element})"),
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::List(items) => match items.iter().find(|item| item.kind() != items[0].kind()) {
            Some(_) => "list of mixed values".to_string(),
            None => items
                .first()
                .map_or_else(|| "empty list".to_string(), |item| format!("list({})", describe(item))),
        },
        Value::Map(entries) => entries.values().next().map_or_else(
            || "empty map".to_string(),
            |item| format!("map({})", describe(item)),
        ),
        other => other.kind().to_string(),
    }
}
