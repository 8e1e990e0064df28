//! taskpad-server: HTTP server for users and todos
//!
//! Exposes two-resource CRUD over JSON, backed by SQLite through sqlx.
//! Each request maps to at most two parameterized SQL statements.

pub mod db;
pub mod http;

pub use http::server::{build_router, run_server, AppState, ServerConfig};
