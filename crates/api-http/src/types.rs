//! HTTP Request/Response Types

use moveops_core::domain::{EmployeeId, ExecutionStatus, MaterialConsumption};
use serde::{Deserialize, Serialize};

/// POST /api/moves/{deal_id}/start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartMoveBody {
    pub team: Vec<EmployeeId>,
}

/// POST /api/moves/{id}/toggle-pause
///
/// `action` stays a string so an unknown value is reported by the domain
/// parser instead of a generic deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogglePauseBody {
    pub action: String,
}

/// POST /api/moves/{id}/complete
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteMoveBody {
    #[serde(default)]
    pub material_usage: Vec<MaterialConsumption>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: ExecutionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
