// Move Execution Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Row id of a `move_executions` record
pub type ExecutionId = i64;

/// Row id of a `deals` record
pub type DealId = i64;

/// Lifecycle status of a move execution.
///
/// ```text
/// pending --start--> in_progress --pause--> paused
///                         ^                   |
///                         +------resume-------+
/// in_progress | paused --complete--> completed (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    InProgress,
    Paused,
    Completed,
}

/// Something that happens to an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionAction {
    Start,
    Pause,
    Resume,
    Complete,
}

impl ExecutionStatus {
    /// All statuses that still count as an open move
    pub const ACTIVE: [ExecutionStatus; 3] = [
        ExecutionStatus::Pending,
        ExecutionStatus::InProgress,
        ExecutionStatus::Paused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::InProgress => "in_progress",
            ExecutionStatus::Paused => "paused",
            ExecutionStatus::Completed => "completed",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, ExecutionStatus::Completed)
    }

    /// Apply `action` and return the resulting status, or reject the transition.
    pub fn transition(self, action: ExecutionAction) -> Result<ExecutionStatus> {
        use ExecutionAction as A;
        use ExecutionStatus as S;

        let next = match (self, action) {
            (S::Pending, A::Start) => S::InProgress,
            (S::InProgress, A::Pause) => S::Paused,
            (S::Paused, A::Resume) => S::InProgress,
            (S::InProgress | S::Paused, A::Complete) => S::Completed,
            (from, action) => {
                return Err(DomainError::InvalidStateTransition {
                    from: from.to_string(),
                    to: action.target().to_string(),
                })
            }
        };
        Ok(next)
    }
}

impl ExecutionAction {
    /// Status the action is aiming for (used in error messages)
    fn target(&self) -> ExecutionStatus {
        match self {
            ExecutionAction::Start | ExecutionAction::Resume => ExecutionStatus::InProgress,
            ExecutionAction::Pause => ExecutionStatus::Paused,
            ExecutionAction::Complete => ExecutionStatus::Completed,
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(ExecutionStatus::Pending),
            "in_progress" => Ok(ExecutionStatus::InProgress),
            "paused" => Ok(ExecutionStatus::Paused),
            "completed" => Ok(ExecutionStatus::Completed),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Pause/resume toggle requested by the crew lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseAction {
    Pause,
    Resume,
}

impl From<PauseAction> for ExecutionAction {
    fn from(action: PauseAction) -> Self {
        match action {
            PauseAction::Pause => ExecutionAction::Pause,
            PauseAction::Resume => ExecutionAction::Resume,
        }
    }
}

impl FromStr for PauseAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pause" => Ok(PauseAction::Pause),
            "resume" => Ok(PauseAction::Resume),
            other => Err(DomainError::UnknownPauseAction(other.to_string())),
        }
    }
}

/// One concrete performance of a scheduled move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveExecution {
    pub id: ExecutionId,
    pub deal_id: DealId,
    pub status: ExecutionStatus,
    pub start_time: Option<i64>, // epoch ms
    pub end_time: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Execution joined with the deal it performs (active-moves board)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveExecution {
    pub id: ExecutionId,
    pub deal_id: DealId,
    pub status: ExecutionStatus,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub deal_title: String,
    pub customer_name: Option<String>,
    pub origin_address: Option<String>,
    pub destination_address: Option<String>,
    pub move_date: Option<String>,
}
