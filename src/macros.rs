/// Build a [`Record`](crate::Record) of column/value pairs in the order written.
///
/// ```rust
/// use relaxed_db::{Value, record};
///
/// let row = record! { "username" => "alice", "age" => 31, "score" => 9.5 };
/// assert_eq!(row[1], ("age".to_string(), Value::Int(31)));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($column:expr => $value:expr),+ $(,)?) => {
        ::std::vec![
            $((::std::string::String::from($column), $crate::Value::from($value))),+
        ]
    };
}
