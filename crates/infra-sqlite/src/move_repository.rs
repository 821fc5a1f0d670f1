// SQLite MoveRepository Implementation

use crate::error::map_sqlx_error;
use crate::rows::{
    ActiveExecutionRow, DealRow, ExecutionRow, MaterialUsageRow, TimeRecordViewRow,
};
use crate::SqliteMoveTransaction;
use async_trait::async_trait;
use moveops_core::domain::{
    ActiveExecution, Deal, DealId, ExecutionId, ExecutionStatus, MaterialUsage, MoveExecution,
    TimeRecordView,
};
use moveops_core::error::Result;
use moveops_core::port::{MoveRepository, MoveRepositoryTransaction, TransactionalMoveRepository};
use sqlx::SqlitePool;

/// Pool-backed repository: reads run directly on the pool, writes go
/// through [`SqliteMoveTransaction`].
#[derive(Clone)]
pub struct SqliteMoveRepository {
    pool: SqlitePool,
}

impl SqliteMoveRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MoveRepository for SqliteMoveRepository {
    async fn find_execution(&self, id: ExecutionId) -> Result<Option<MoveExecution>> {
        let row = sqlx::query_as::<_, ExecutionRow>(
            r#"
            SELECT id, deal_id, status, start_time, end_time, notes, created_at
            FROM move_executions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(ExecutionRow::into_execution).transpose()
    }

    async fn find_deal(&self, id: DealId) -> Result<Option<Deal>> {
        let row = sqlx::query_as::<_, DealRow>(
            r#"
            SELECT id, pipedrive_id, title, customer_name, origin_address,
                   destination_address, move_date, value, status
            FROM deals
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Deal::from))
    }

    async fn list_active(&self) -> Result<Vec<ActiveExecution>> {
        let [pending, in_progress, paused] = ExecutionStatus::ACTIVE;

        let rows: Vec<ActiveExecutionRow> = sqlx::query_as(
            r#"
            SELECT e.id, e.deal_id, e.status, e.start_time, e.end_time, e.notes, e.created_at,
                   d.title AS deal_title, d.customer_name, d.origin_address,
                   d.destination_address, d.move_date
            FROM move_executions e
            JOIN deals d ON d.id = e.deal_id
            WHERE e.status IN (?, ?, ?)
            ORDER BY e.created_at DESC, e.id DESC
            "#,
        )
        .bind(pending.as_str())
        .bind(in_progress.as_str())
        .bind(paused.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(ActiveExecutionRow::into_active).collect()
    }

    async fn list_time_records(&self, execution_id: ExecutionId) -> Result<Vec<TimeRecordView>> {
        let rows: Vec<TimeRecordViewRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.execution_id, t.employee_id, t.start_time, t.end_time,
                   t.break_start, t.break_end,
                   emp.first_name || ' ' || emp.last_name AS employee_name
            FROM time_records t
            JOIN employees emp ON emp.id = t.employee_id
            WHERE t.execution_id = ?
            ORDER BY t.start_time ASC, t.id ASC
            "#,
        )
        .bind(execution_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(TimeRecordView::from).collect())
    }

    async fn list_material_usage(&self, execution_id: ExecutionId) -> Result<Vec<MaterialUsage>> {
        let rows: Vec<MaterialUsageRow> = sqlx::query_as(
            r#"
            SELECT id, execution_id, material_id, quantity, created_at
            FROM move_material_usage
            WHERE execution_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(execution_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(MaterialUsage::from).collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionalMoveRepository for SqliteMoveRepository {
    /// Takes the write lock up front so concurrent writers wait on the busy
    /// timeout instead of failing a read-to-write lock upgrade.
    async fn begin_transaction(&self) -> Result<Box<dyn MoveRepositoryTransaction>> {
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteMoveTransaction::new(tx)))
    }
}
