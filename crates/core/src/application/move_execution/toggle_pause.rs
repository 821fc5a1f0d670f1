// Pause / Resume Use Case

use crate::domain::{ExecutionId, ExecutionStatus, PauseAction};
use crate::error::{AppError, Result};
use crate::port::{MoveRepositoryTransaction, TimeProvider, TransactionalMoveRepository};

use super::finish_transaction;

/// Flip an execution between `in_progress` and `paused`.
///
/// Pausing opens a break on every open time record. A record whose previous
/// break is already over marks the end of a working segment: it is closed and
/// a new segment for the same employee starts on break. Resuming closes every
/// open break.
pub async fn execute(
    repo: &dyn TransactionalMoveRepository,
    time_provider: &dyn TimeProvider,
    execution_id: ExecutionId,
    action: PauseAction,
) -> Result<ExecutionStatus> {
    let now = time_provider.now_millis();
    let mut tx = repo.begin_transaction().await?;
    let outcome = apply(tx.as_mut(), execution_id, action, now).await;
    let (status, touched) = finish_transaction(tx, outcome).await?;

    tracing::info!(
        execution_id,
        action = ?action,
        status = %status,
        time_records = touched,
        "Move execution toggled"
    );

    Ok(status)
}

async fn apply(
    tx: &mut dyn MoveRepositoryTransaction,
    execution_id: ExecutionId,
    action: PauseAction,
    now: i64,
) -> Result<(ExecutionStatus, u64)> {
    let execution = tx
        .find_execution(execution_id)
        .await?
        .ok_or_else(|| AppError::not_found("Move execution", execution_id))?;

    let next = execution.status.transition(action.into())?;
    tx.update_status(execution_id, next).await?;

    let touched = match action {
        PauseAction::Pause => {
            let mut rolled = 0;
            for record in tx.open_time_records(execution_id).await? {
                if record.break_end.is_some() {
                    tx.close_time_record(record.id, now).await?;
                    tx.insert_time_record(execution_id, record.employee_id, now, Some(now))
                        .await?;
                    rolled += 1;
                }
            }
            rolled + tx.start_breaks(execution_id, now).await?
        }
        PauseAction::Resume => tx.end_breaks(execution_id, now).await?,
    };

    Ok((next, touched))
}
