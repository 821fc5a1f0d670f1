// Move Execution Service - lifecycle of a move from start to completion

pub mod complete;
pub mod start;
pub mod toggle_pause;

#[cfg(test)]
mod fake;

pub use complete::CompleteRequest;
pub use start::{StartRequest, StartedExecution};

use crate::domain::{
    summarize_worked_time, ActiveExecution, ExecutionId, ExecutionStatus, MaterialUsage,
    MoveExecution, PauseAction, TimeRecordView, WorkedTime,
};
use crate::error::{AppError, Result};
use crate::port::{MoveRepository, MoveRepositoryTransaction, TimeProvider, TransactionalMoveRepository};
use serde::Serialize;
use std::sync::Arc;

/// Everything known about one execution
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionDetail {
    pub execution: MoveExecution,
    pub time_records: Vec<TimeRecordView>,
    pub material_usage: Vec<MaterialUsage>,
    pub worked_time: Vec<WorkedTime>,
}

/// Move Execution Service
pub struct MoveExecutionService {
    tx_repo: Arc<dyn TransactionalMoveRepository>,
    repo: Arc<dyn MoveRepository>,
    time_provider: Arc<dyn TimeProvider>,
}

impl MoveExecutionService {
    pub fn new(
        tx_repo: Arc<dyn TransactionalMoveRepository>,
        repo: Arc<dyn MoveRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            tx_repo,
            repo,
            time_provider,
        }
    }

    /// Start a move for `deal_id` with the given crew
    pub async fn start(&self, req: StartRequest) -> Result<StartedExecution> {
        start::execute(self.tx_repo.as_ref(), self.time_provider.as_ref(), req).await
    }

    /// Pause or resume a running move
    pub async fn toggle_pause(
        &self,
        execution_id: ExecutionId,
        action: PauseAction,
    ) -> Result<ExecutionStatus> {
        toggle_pause::execute(
            self.tx_repo.as_ref(),
            self.time_provider.as_ref(),
            execution_id,
            action,
        )
        .await
    }

    /// Complete a move and book its material consumption
    pub async fn complete(&self, req: CompleteRequest) -> Result<()> {
        complete::execute(self.tx_repo.as_ref(), self.time_provider.as_ref(), req).await
    }

    /// Moves that have not been completed yet, newest first
    pub async fn get_active(&self) -> Result<Vec<ActiveExecution>> {
        self.repo.list_active().await
    }

    pub async fn get_time_records(&self, execution_id: ExecutionId) -> Result<Vec<TimeRecordView>> {
        self.require_execution(execution_id).await?;
        self.repo.list_time_records(execution_id).await
    }

    pub async fn get_execution(&self, execution_id: ExecutionId) -> Result<ExecutionDetail> {
        let execution = self.require_execution(execution_id).await?;
        let time_records = self.repo.list_time_records(execution_id).await?;
        let material_usage = self.repo.list_material_usage(execution_id).await?;

        // Finished moves are measured up to their end, running ones up to now
        let now = execution
            .end_time
            .unwrap_or_else(|| self.time_provider.now_millis());
        let worked_time = summarize_worked_time(time_records.iter().map(|v| &v.record), now);

        Ok(ExecutionDetail {
            execution,
            time_records,
            material_usage,
            worked_time,
        })
    }

    /// Storage reachability, for health endpoints
    pub async fn check_storage(&self) -> Result<()> {
        self.repo.ping().await
    }

    async fn require_execution(&self, execution_id: ExecutionId) -> Result<MoveExecution> {
        self.repo
            .find_execution(execution_id)
            .await?
            .ok_or_else(|| AppError::not_found("Move execution", execution_id))
    }
}

/// Commit on success, explicit rollback on failure.
///
/// The original error is returned even when the rollback itself fails; the
/// rollback failure is only logged (the driver discards the transaction on
/// drop anyway).
pub(crate) async fn finish_transaction<T>(
    tx: Box<dyn MoveRepositoryTransaction>,
    outcome: Result<T>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tracing::debug!(error = %err, "Rolling back move execution transaction");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(
                    error = %err,
                    rollback_error = %rollback_err,
                    "Rollback failed"
                );
            }
            Err(err)
        }
    }
}
