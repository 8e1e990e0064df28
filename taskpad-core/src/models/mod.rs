//! Domain models
//!
//! Timestamps are stored as unix epoch milliseconds in the database and
//! converted to `DateTime<Utc>` here, at the model boundary.

mod pagination;
mod todo;
mod user;
mod validation;

pub use pagination::{ListParams, Page};
pub use todo::{NewTodo, Todo, TodoPatch};
pub use user::{NewUser, User, UserPatch};
pub use validation::ValidationError;

use chrono::{DateTime, Utc};

/// Convert a stored epoch-milliseconds value to a UTC datetime.
pub fn ts_to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Convert a UTC datetime to the stored epoch-milliseconds representation.
pub fn datetime_to_ts(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}
