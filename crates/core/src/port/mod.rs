// Port Layer - Interfaces for external dependencies

pub mod move_repository;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use move_repository::MoveRepository;
pub use time_provider::{ManualTimeProvider, SystemTimeProvider, TimeProvider};
pub use transaction::{MoveRepositoryTransaction, Transaction, TransactionalMoveRepository};
