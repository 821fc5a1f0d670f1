// Transaction port for atomic operations

use crate::domain::{
    Deal, DealId, Employee, EmployeeId, ExecutionId, ExecutionStatus, MaterialId, MoveExecution,
    TimeRecord, TimeRecordId,
};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Entry point for transactional writes
#[async_trait]
pub trait TransactionalMoveRepository: Send + Sync {
    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn MoveRepositoryTransaction>>;
}

/// Statements available inside a move-execution transaction.
///
/// Bulk updates return the number of affected rows.
#[async_trait]
pub trait MoveRepositoryTransaction: Transaction {
    async fn find_deal(&mut self, id: DealId) -> Result<Option<Deal>>;

    async fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>>;

    async fn find_execution(&mut self, id: ExecutionId) -> Result<Option<MoveExecution>>;

    /// Open time records (`end_time IS NULL`) of an execution
    async fn open_time_records(&mut self, execution_id: ExecutionId) -> Result<Vec<TimeRecord>>;

    /// Insert execution row, returns its id
    async fn insert_execution(
        &mut self,
        deal_id: DealId,
        status: ExecutionStatus,
        now: i64,
    ) -> Result<ExecutionId>;

    /// Insert a working segment starting at `start_time`, optionally already on break
    async fn insert_time_record(
        &mut self,
        execution_id: ExecutionId,
        employee_id: EmployeeId,
        start_time: i64,
        break_start: Option<i64>,
    ) -> Result<TimeRecordId>;

    async fn update_status(&mut self, id: ExecutionId, status: ExecutionStatus) -> Result<()>;

    /// `break_start = now` on open records that have not had a break yet
    async fn start_breaks(&mut self, execution_id: ExecutionId, now: i64) -> Result<u64>;

    /// `break_end = now` on records with an open break
    async fn end_breaks(&mut self, execution_id: ExecutionId, now: i64) -> Result<u64>;

    /// Close a single segment (`end_time = now`)
    async fn close_time_record(&mut self, id: TimeRecordId, now: i64) -> Result<()>;

    /// `end_time = now` on every open record of the execution
    async fn close_time_records(&mut self, execution_id: ExecutionId, now: i64) -> Result<u64>;

    /// Mark completed with end time and notes
    async fn finish_execution(
        &mut self,
        id: ExecutionId,
        now: i64,
        notes: Option<&str>,
    ) -> Result<()>;

    async fn insert_material_usage(
        &mut self,
        execution_id: ExecutionId,
        material_id: MaterialId,
        quantity: i64,
        now: i64,
    ) -> Result<()>;

    /// Subtract from `materials.current_stock`; returns the stock left, `None` if unknown material
    async fn decrement_stock(&mut self, material_id: MaterialId, quantity: i64)
        -> Result<Option<i64>>;
}
