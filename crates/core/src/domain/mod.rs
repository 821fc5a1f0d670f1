// Domain Layer - Pure business logic and entities

pub mod catalog;
pub mod error;
pub mod execution;
pub mod material;
pub mod time_record;

// Re-exports
pub use catalog::{Deal, Employee, EmployeeId, Material, MaterialId};
pub use error::DomainError;
pub use execution::{
    ActiveExecution, DealId, ExecutionAction, ExecutionId, ExecutionStatus, MoveExecution,
    PauseAction,
};
pub use material::{validate_consumption, MaterialConsumption, MaterialUsage};
pub use time_record::{summarize_worked_time, TimeRecord, TimeRecordId, TimeRecordView, WorkedTime};
