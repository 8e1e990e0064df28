//! taskpad-core: domain types for the taskpad CRUD backend
//!
//! Holds the entity models, field validation, and pagination types shared
//! by the server crate. No I/O and no SQL live here.

pub mod models;

pub use models::{
    datetime_to_ts, ts_to_datetime, ListParams, NewTodo, NewUser, Page, Todo, TodoPatch, User,
    UserPatch, ValidationError,
};
