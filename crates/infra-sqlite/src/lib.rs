// MoveOps Infrastructure - SQLite Adapter
// Implements: MoveRepository, TransactionalMoveRepository

mod connection;
mod error;
mod migration;
mod move_repository;
mod rows;
pub mod seed;
mod transaction;

pub use connection::create_pool;
pub use migration::run_migrations;
pub use move_repository::SqliteMoveRepository;
pub use transaction::SqliteMoveTransaction;

// Note: sqlx::Error conversion is handled by `error::map_sqlx_error`
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
