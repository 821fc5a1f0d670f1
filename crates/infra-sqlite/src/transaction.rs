// SQLite Transaction Implementation

use crate::error::map_sqlx_error;
use crate::rows::{DealRow, EmployeeRow, ExecutionRow, TimeRecordRow};
use async_trait::async_trait;
use moveops_core::domain::{
    Deal, DealId, Employee, EmployeeId, ExecutionId, ExecutionStatus, MaterialId, MoveExecution,
    TimeRecord, TimeRecordId,
};
use moveops_core::error::{AppError, Result};
use moveops_core::port::{MoveRepositoryTransaction, Transaction};
use sqlx::{Sqlite, Transaction as SqlxTransaction};

pub struct SqliteMoveTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteMoveTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteMoveTransaction<'_> {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl MoveRepositoryTransaction for SqliteMoveTransaction<'_> {
    async fn find_deal(&mut self, id: DealId) -> Result<Option<Deal>> {
        let row = sqlx::query_as::<_, DealRow>(
            r#"
            SELECT id, pipedrive_id, title, customer_name, origin_address,
                   destination_address, move_date, value, status
            FROM deals
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Deal::from))
    }

    async fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, first_name, last_name, role, is_active FROM employees WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Employee::from))
    }

    async fn find_execution(&mut self, id: ExecutionId) -> Result<Option<MoveExecution>> {
        let row = sqlx::query_as::<_, ExecutionRow>(
            r#"
            SELECT id, deal_id, status, start_time, end_time, notes, created_at
            FROM move_executions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        row.map(ExecutionRow::into_execution).transpose()
    }

    async fn open_time_records(&mut self, execution_id: ExecutionId) -> Result<Vec<TimeRecord>> {
        let rows: Vec<TimeRecordRow> = sqlx::query_as(
            r#"
            SELECT id, execution_id, employee_id, start_time, end_time, break_start, break_end
            FROM time_records
            WHERE execution_id = ? AND end_time IS NULL
            ORDER BY id ASC
            "#,
        )
        .bind(execution_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(TimeRecord::from).collect())
    }

    async fn insert_execution(
        &mut self,
        deal_id: DealId,
        status: ExecutionStatus,
        now: i64,
    ) -> Result<ExecutionId> {
        let result = sqlx::query(
            r#"
            INSERT INTO move_executions (deal_id, status, start_time, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(deal_id)
        .bind(status.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn insert_time_record(
        &mut self,
        execution_id: ExecutionId,
        employee_id: EmployeeId,
        start_time: i64,
        break_start: Option<i64>,
    ) -> Result<TimeRecordId> {
        let result = sqlx::query(
            r#"
            INSERT INTO time_records (execution_id, employee_id, start_time, break_start)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(execution_id)
        .bind(employee_id)
        .bind(start_time)
        .bind(break_start)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn update_status(&mut self, id: ExecutionId, status: ExecutionStatus) -> Result<()> {
        let result = sqlx::query("UPDATE move_executions SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Move execution", id));
        }
        Ok(())
    }

    async fn start_breaks(&mut self, execution_id: ExecutionId, now: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE time_records
            SET break_start = ?
            WHERE execution_id = ? AND end_time IS NULL AND break_start IS NULL
            "#,
        )
        .bind(now)
        .bind(execution_id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn end_breaks(&mut self, execution_id: ExecutionId, now: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE time_records
            SET break_end = ?
            WHERE execution_id = ? AND break_start IS NOT NULL AND break_end IS NULL
            "#,
        )
        .bind(now)
        .bind(execution_id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn close_time_record(&mut self, id: TimeRecordId, now: i64) -> Result<()> {
        sqlx::query("UPDATE time_records SET end_time = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn close_time_records(&mut self, execution_id: ExecutionId, now: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE time_records
            SET end_time = ?
            WHERE execution_id = ? AND end_time IS NULL
            "#,
        )
        .bind(now)
        .bind(execution_id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn finish_execution(
        &mut self,
        id: ExecutionId,
        now: i64,
        notes: Option<&str>,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE move_executions
            SET status = ?, end_time = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(ExecutionStatus::Completed.as_str())
        .bind(now)
        .bind(notes)
        .bind(id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Move execution", id));
        }
        Ok(())
    }

    async fn insert_material_usage(
        &mut self,
        execution_id: ExecutionId,
        material_id: MaterialId,
        quantity: i64,
        now: i64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO move_material_usage (execution_id, material_id, quantity, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(execution_id)
        .bind(material_id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn decrement_stock(
        &mut self,
        material_id: MaterialId,
        quantity: i64,
    ) -> Result<Option<i64>> {
        sqlx::query_scalar(
            r#"
            UPDATE materials
            SET current_stock = current_stock - ?
            WHERE id = ?
            RETURNING current_stock
            "#,
        )
        .bind(quantity)
        .bind(material_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)
    }
}
