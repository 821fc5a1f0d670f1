// Application Layer - Use Cases and Business Logic

pub mod move_execution;

// Re-exports
pub use move_execution::{
    CompleteRequest, ExecutionDetail, MoveExecutionService, StartRequest, StartedExecution,
};
