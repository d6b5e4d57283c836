use chrono::NaiveDateTime;
use serde::Serialize;

/// Values that can be bound as statement parameters or read back from a row.
///
/// Every variant has a fixed binding rule (see [`Value::bind_type`]), so no value is ever
/// silently coerced to a string:
/// ```rust
/// use relaxed_db::{BindType, Value};
///
/// assert_eq!(Value::from(7).bind_type(), BindType::Integer);
/// assert_eq!(Value::from(true).bind_type(), BindType::Integer);
/// assert_eq!(Value::from(1.5).bind_type(), BindType::Real);
/// assert_eq!(Value::Null.bind_type(), BindType::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value, bound as integer 0/1
    Bool(bool),
    /// Timestamp value, bound as text
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// Binary data
    Blob(Vec<u8>),
}

/// Column/value pairs for `insert` and `update`, in the order they should be written.
pub type Record = Vec<(String, Value)>;

/// Parameter type a [`Value`] is bound with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindType {
    Integer,
    Real,
    Text,
    Null,
    Blob,
}

/// Format used when a timestamp is bound as text.
pub const TIMESTAMP_BIND_FORMAT: &str = "%F %T%.f";

impl Value {
    /// Classify the value for positional binding.
    ///
    /// | variant     | bound as  |
    /// |-------------|-----------|
    /// | `Int`       | `Integer` |
    /// | `Float`     | `Real`    |
    /// | `Text`      | `Text`    |
    /// | `Bool`      | `Integer` (0 or 1) |
    /// | `Timestamp` | `Text` ([`TIMESTAMP_BIND_FORMAT`]) |
    /// | `Null`      | `Null`    |
    /// | `Blob`      | `Blob`    |
    #[must_use]
    pub fn bind_type(&self) -> BindType {
        match self {
            Value::Int(_) | Value::Bool(_) => BindType::Integer,
            Value::Float(_) => BindType::Real,
            Value::Text(_) | Value::Timestamp(_) => BindType::Text,
            Value::Null => BindType::Null,
            Value::Blob(_) => BindType::Blob,
        }
    }

    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let Value::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Value::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Booleans come back from most drivers as 0/1 integers, so those are accepted too.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            Value::Int(1) => Some(true),
            Value::Int(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let Value::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let Value::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Convert to a JSON value. Blobs become arrays of bytes.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
