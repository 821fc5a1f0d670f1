// Complete Use Case

use crate::domain::{
    validate_consumption, ExecutionAction, ExecutionId, ExecutionStatus, MaterialConsumption,
};
use crate::error::{AppError, Result};
use crate::port::{MoveRepositoryTransaction, TimeProvider, TransactionalMoveRepository};
use serde::{Deserialize, Serialize};

use super::finish_transaction;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteRequest {
    pub execution_id: ExecutionId,
    pub material_usage: Vec<MaterialConsumption>,
    pub notes: Option<String>,
}

/// Finish a move: close the execution and its time records, book material
/// consumption and take it out of stock. All or nothing.
///
/// Stock is not checked against the requested quantity, so it can go
/// negative. That is logged, not rejected.
pub async fn execute(
    repo: &dyn TransactionalMoveRepository,
    time_provider: &dyn TimeProvider,
    req: CompleteRequest,
) -> Result<()> {
    validate_consumption(&req.material_usage)?;

    let now = time_provider.now_millis();
    let mut tx = repo.begin_transaction().await?;
    let outcome = apply(tx.as_mut(), &req, now).await;
    let closed = finish_transaction(tx, outcome).await?;

    tracing::info!(
        execution_id = req.execution_id,
        time_records_closed = closed,
        materials = req.material_usage.len(),
        "Move completed"
    );

    Ok(())
}

async fn apply(
    tx: &mut dyn MoveRepositoryTransaction,
    req: &CompleteRequest,
    now: i64,
) -> Result<u64> {
    let execution = tx
        .find_execution(req.execution_id)
        .await?
        .ok_or_else(|| AppError::not_found("Move execution", req.execution_id))?;

    execution.status.transition(ExecutionAction::Complete)?;

    if execution.status == ExecutionStatus::Paused {
        tx.end_breaks(req.execution_id, now).await?;
    }
    let closed = tx.close_time_records(req.execution_id, now).await?;
    tx.finish_execution(req.execution_id, now, req.notes.as_deref())
        .await?;

    for item in &req.material_usage {
        let left = tx
            .decrement_stock(item.material_id, item.quantity)
            .await?
            .ok_or_else(|| AppError::not_found("Material", item.material_id))?;

        if left < 0 {
            tracing::warn!(
                material_id = item.material_id,
                current_stock = left,
                "Material stock went negative"
            );
        }

        tx.insert_material_usage(req.execution_id, item.material_id, item.quantity, now)
            .await?;
    }

    Ok(closed)
}
