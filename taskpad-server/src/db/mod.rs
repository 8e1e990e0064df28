//! Database layer: pool construction, migrations, repositories

pub mod migrations;
pub mod pool;
pub mod repos;

pub use migrations::run_migrations;
pub use pool::{connect, connect_in_memory};
