// Start Use Case

use crate::domain::{DealId, EmployeeId, ExecutionAction, ExecutionId, ExecutionStatus};
use crate::error::{AppError, Result};
use crate::port::{MoveRepositoryTransaction, TimeProvider, TransactionalMoveRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::finish_transaction;

/// Start request: which deal is being moved and by whom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    pub deal_id: DealId,
    pub team: Vec<EmployeeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedExecution {
    pub id: ExecutionId,
    pub status: ExecutionStatus,
}

/// Validate start request (runs before any write)
pub fn validate_request(req: &StartRequest) -> Result<()> {
    if req.team.is_empty() {
        return Err(AppError::Validation(
            "Team must contain at least one employee".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(req.team.len());
    if let Some(dup) = req.team.iter().find(|id| !seen.insert(**id)) {
        return Err(AppError::Validation(format!(
            "Employee {} is assigned more than once",
            dup
        )));
    }

    Ok(())
}

/// Execute start use case: one execution row plus one time record per
/// team member, all in a single transaction.
pub async fn execute(
    repo: &dyn TransactionalMoveRepository,
    time_provider: &dyn TimeProvider,
    req: StartRequest,
) -> Result<StartedExecution> {
    validate_request(&req)?;

    let now = time_provider.now_millis();
    let mut tx = repo.begin_transaction().await?;
    let outcome = apply(tx.as_mut(), &req, now).await;
    let started = finish_transaction(tx, outcome).await?;

    tracing::info!(
        execution_id = started.id,
        deal_id = req.deal_id,
        team_size = req.team.len(),
        "Move started"
    );

    Ok(started)
}

async fn apply(
    tx: &mut dyn MoveRepositoryTransaction,
    req: &StartRequest,
    now: i64,
) -> Result<StartedExecution> {
    if tx.find_deal(req.deal_id).await?.is_none() {
        return Err(AppError::not_found("Deal", req.deal_id));
    }

    let status = ExecutionStatus::Pending.transition(ExecutionAction::Start)?;
    let execution_id = tx.insert_execution(req.deal_id, status, now).await?;

    for &employee_id in &req.team {
        if tx.find_employee(employee_id).await?.is_none() {
            return Err(AppError::not_found("Employee", employee_id));
        }
        tx.insert_time_record(execution_id, employee_id, now, None)
            .await?;
    }

    Ok(StartedExecution {
        id: execution_id,
        status,
    })
}
