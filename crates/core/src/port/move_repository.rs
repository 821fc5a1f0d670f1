// Move Repository Port (read side)

use crate::domain::{
    ActiveExecution, Deal, DealId, ExecutionId, MaterialUsage, MoveExecution, TimeRecordView,
};
use crate::error::Result;
use async_trait::async_trait;

/// Read-only queries over executions and their children.
///
/// Writes go through [`crate::port::TransactionalMoveRepository`] so that every
/// mutation happens inside an explicit transaction.
#[async_trait]
pub trait MoveRepository: Send + Sync {
    /// Find execution by ID
    async fn find_execution(&self, id: ExecutionId) -> Result<Option<MoveExecution>>;

    /// Find deal by ID
    async fn find_deal(&self, id: DealId) -> Result<Option<Deal>>;

    /// Executions that are pending, in progress or paused, newest first
    async fn list_active(&self) -> Result<Vec<ActiveExecution>>;

    /// Time records of an execution with the employee display name
    async fn list_time_records(&self, execution_id: ExecutionId) -> Result<Vec<TimeRecordView>>;

    /// Material usage booked against an execution
    async fn list_material_usage(&self, execution_id: ExecutionId) -> Result<Vec<MaterialUsage>>;

    /// Cheap round trip to the store (health checks)
    async fn ping(&self) -> Result<()>;
}
