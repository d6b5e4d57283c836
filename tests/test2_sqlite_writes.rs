#![cfg(feature = "sqlite")]

use std::time::Duration;

use chrono::NaiveDate;
use relaxed_db::prelude::*;
use relaxed_db::rusqlite;
use tempfile::tempdir;

const SCHEMA: &str = "CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    age INTEGER,
    score REAL,
    active INTEGER NOT NULL DEFAULT 1,
    joined_at TEXT,
    avatar BLOB
);";

fn empty_db() -> Result<Db<rusqlite::Connection>, DbError> {
    let db = SqliteOptions::in_memory().open()?;
    db.connection().execute_batch(SCHEMA)?;
    Ok(db)
}

#[test]
fn insert_reports_success() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    let inserted = db
        .table("users")
        .insert(record! { "username" => "test1234" })?;
    assert!(inserted);
    assert_eq!(db.table("users").count()?, 1);
    Ok(())
}

#[test]
fn insert_get_id_is_strictly_increasing() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    let mut last = 0;
    for i in 0..5_i64 {
        let id = db
            .table("users")
            .insert_get_id(record! { "username" => format!("user{i}"), "age" => i })?;
        assert!(id > last, "{id} should exceed {last}");
        last = id;
    }
    Ok(())
}

#[test]
fn inserted_values_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    let joined = NaiveDate::from_ymd_opt(2023, 7, 14)
        .and_then(|d| d.and_hms_opt(9, 15, 0))
        .expect("valid date");
    let data = record! {
        "username" => "alice",
        "age" => 31,
        "score" => 9.5,
        "active" => false,
        "joined_at" => joined,
        "avatar" => vec![1_u8, 2, 3],
    };
    let id = db.table("users").insert_get_id(data)?;

    let row = db
        .table("users")
        .where_("id", "=", id)
        .first()?
        .expect("inserted row");
    assert_eq!(row.get("username"), Some(&Value::Text("alice".into())));
    assert_eq!(row.get("age"), Some(&Value::Int(31)));
    assert_eq!(row.get("score"), Some(&Value::Float(9.5)));
    assert_eq!(row.get("active").and_then(Value::as_bool), Some(false));
    assert_eq!(
        row.get("joined_at").and_then(Value::as_timestamp),
        Some(joined)
    );
    assert_eq!(
        row.get("avatar").and_then(Value::as_blob),
        Some(&[1_u8, 2, 3][..])
    );
    Ok(())
}

#[test]
fn insert_honors_column_order() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    // columns listed in the opposite order of the table definition
    let id = db
        .table("users")
        .insert_get_id([("age", Value::Int(40)), ("username", Value::from("zed"))])?;
    let row = db.table("users").find(id)?.expect("row");
    assert_eq!(row.get("age"), Some(&Value::Int(40)));
    assert_eq!(row.get("username").and_then(Value::as_text), Some("zed"));
    Ok(())
}

#[test]
fn unsupplied_columns_take_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    let id = db.table("users").insert_get_id([("username", "defaulted")])?;
    let row = db.table("users").find(id)?.expect("row");
    assert_eq!(row.get("active"), Some(&Value::Int(1)));
    assert_eq!(row.get("age"), Some(&Value::Null));
    Ok(())
}

#[test]
fn update_only_touches_matching_rows() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    let a = db
        .table("users")
        .insert_get_id(record! { "username" => "a", "age" => 10 })?;
    let b = db
        .table("users")
        .insert_get_id(record! { "username" => "b", "age" => 20 })?;

    let affected = db
        .table("users")
        .where_("id", "=", a)
        .update(record! { "age" => 11, "score" => 1.5 })?;
    assert_eq!(affected, 1);

    let row_a = db.table("users").find(a)?.expect("a");
    assert_eq!(row_a.get("age"), Some(&Value::Int(11)));
    assert_eq!(row_a.get("score"), Some(&Value::Float(1.5)));

    let row_b = db.table("users").find(b)?.expect("b");
    assert_eq!(row_b.get("age"), Some(&Value::Int(20)));
    assert_eq!(row_b.get("score"), Some(&Value::Null));
    Ok(())
}

#[test]
fn update_with_or_predicates() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    for (name, age) in [("a", 1), ("b", 2), ("c", 3)] {
        db.table("users")
            .insert(record! { "username" => name, "age" => age })?;
    }
    let affected = db
        .table("users")
        .where_("username", "=", "a")
        .or_where("username", "=", "c")
        .update([("active", false)])?;
    assert_eq!(affected, 2);
    assert_eq!(db.table("users").where_("active", "=", false).count()?, 2);
    let still_active = db.table("users").where_("active", "=", true).first()?;
    assert_eq!(
        still_active.as_ref().and_then(|row| row.get("username")),
        Some(&Value::from("b"))
    );
    Ok(())
}

#[test]
fn update_ignores_limit() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    for name in ["a", "b", "c"] {
        db.table("users").insert([("username", name)])?;
    }
    let affected = db.table("users").limit(1).update([("age", 5)])?;
    assert_eq!(affected, 3);
    Ok(())
}

#[test]
fn delete_scoped_by_predicate() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    for (name, age) in [("a", 15), ("b", 30), ("c", 16)] {
        db.table("users")
            .insert(record! { "username" => name, "age" => age })?;
    }
    let removed = db.table("users").where_("age", "<", 18).delete()?;
    assert_eq!(removed, 2);
    let left = db.table("users").get()?;
    assert_eq!(left.len(), 1);
    assert_eq!(
        left.first().and_then(|row| row.get("username")),
        Some(&Value::from("b"))
    );
    Ok(())
}

#[test]
fn truncate_empties_table_and_tolerates_empty() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    for name in ["a", "b", "c"] {
        db.table("users").insert([("username", name)])?;
    }
    db.table("users").truncate()?;
    assert_eq!(db.table("users").count()?, 0);
    db.table("users").truncate()?;
    assert!(db.table("users").get()?.is_empty());
    Ok(())
}

#[test]
fn empty_data_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    let err = db.table("users").insert(Record::new()).unwrap_err();
    assert!(matches!(err, DbError::ParameterError(_)), "{err:?}");
    let err = db.table("users").update(record! {}).unwrap_err();
    assert!(matches!(err, DbError::ParameterError(_)), "{err:?}");
    Ok(())
}

#[test]
fn constraint_violation_propagates() -> Result<(), Box<dyn std::error::Error>> {
    let db = empty_db()?;
    db.table("users").insert([("username", "dupe")])?;
    let err = db.table("users").insert([("username", "dupe")]).unwrap_err();
    match err {
        DbError::SqliteError(rusqlite::Error::SqliteFailure(code, _)) => {
            assert_eq!(code.code, rusqlite::ErrorCode::ConstraintViolation);
        }
        other => panic!("expected constraint failure, got {other:?}"),
    }
    assert_eq!(db.table("users").count()?, 1);
    Ok(())
}

#[test]
fn file_database_persists_between_opens() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("persist.db").to_string_lossy().into_owned();

    {
        let db = SqliteOptions::builder(path.clone())
            .wal(true)
            .busy_timeout(Duration::from_millis(500))
            .open()?;
        db.connection().execute_batch(SCHEMA)?;
        db.table("users").insert([("username", "kept")])?;
    }

    let db = SqliteOptionsBuilder::new(path).open()?;
    let row = db.table("users").first()?.expect("persisted row");
    assert_eq!(row.get("username").and_then(Value::as_text), Some("kept"));
    Ok(())
}
