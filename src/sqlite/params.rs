use rusqlite::types::Value as SqliteValue;

use crate::error::{DbError, DbResult};
use crate::types::{BindType, TIMESTAMP_BIND_FORMAT, Value};

/// Convert a [`Value`] to the rusqlite value for the bind type the executor chose.
///
/// `Integer` carries ints and booleans (0/1), `Text` carries text and timestamps
/// formatted with [`TIMESTAMP_BIND_FORMAT`].
///
/// # Errors
/// Returns `DbError::ParameterError` if `bind_type` cannot carry `value`.
pub fn value_to_sqlite(value: &Value, bind_type: BindType) -> DbResult<SqliteValue> {
    let converted = match (bind_type, value) {
        (BindType::Integer, Value::Int(i)) => SqliteValue::Integer(*i),
        (BindType::Integer, Value::Bool(b)) => SqliteValue::Integer(i64::from(*b)),
        (BindType::Real, Value::Float(f)) => SqliteValue::Real(*f),
        (BindType::Text, Value::Text(s)) => SqliteValue::Text(s.clone()),
        (BindType::Text, Value::Timestamp(dt)) => {
            SqliteValue::Text(dt.format(TIMESTAMP_BIND_FORMAT).to_string())
        }
        (BindType::Null, Value::Null) => SqliteValue::Null,
        (BindType::Blob, Value::Blob(bytes)) => SqliteValue::Blob(bytes.clone()),
        (hint, value) => {
            return Err(DbError::ParameterError(format!("cannot bind {value:?} as {hint:?}")));
        }
    };
    Ok(converted)
}

/// Convert a value read from SQLite.
#[must_use]
pub fn value_from_sqlite(value: SqliteValue) -> Value {
    match value {
        SqliteValue::Null => Value::Null,
        SqliteValue::Integer(i) => Value::Int(i),
        SqliteValue::Real(f) => Value::Float(f),
        SqliteValue::Text(s) => Value::Text(s),
        SqliteValue::Blob(b) => Value::Blob(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn conversion_follows_bind_type() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let values = [
            Value::Int(1),
            Value::Float(2.5),
            Value::Text("t".into()),
            Value::Bool(true),
            Value::Timestamp(ts),
            Value::Null,
            Value::Blob(vec![0xde, 0xad]),
        ];
        for value in &values {
            let converted = value_to_sqlite(value, value.bind_type()).unwrap();
            let matches = match (value.bind_type(), &converted) {
                (BindType::Integer, SqliteValue::Integer(_))
                | (BindType::Real, SqliteValue::Real(_))
                | (BindType::Text, SqliteValue::Text(_))
                | (BindType::Null, SqliteValue::Null)
                | (BindType::Blob, SqliteValue::Blob(_)) => true,
                _ => false,
            };
            assert!(matches, "{value:?} bound as {converted:?}");
        }
    }

    #[test]
    fn bool_and_timestamp_encoding() {
        assert_eq!(
            value_to_sqlite(&Value::Bool(false), BindType::Integer).unwrap(),
            SqliteValue::Integer(0)
        );
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(
            value_to_sqlite(&Value::Timestamp(ts), BindType::Text).unwrap(),
            SqliteValue::Text("2024-01-02 03:04:05".into())
        );
    }

    #[test]
    fn mismatched_hint_is_rejected() {
        for (value, hint) in [
            (Value::Float(1.5), BindType::Text),
            (Value::Text("1".into()), BindType::Integer),
            (Value::Int(0), BindType::Null),
            (Value::Null, BindType::Blob),
        ] {
            let err = value_to_sqlite(&value, hint).unwrap_err();
            assert!(
                matches!(err, DbError::ParameterError(_)),
                "{value:?} as {hint:?}"
            );
        }
    }
}
