mod result_set;
mod row;

pub use result_set::RowSet;
pub use row::Row;
