// Material Usage Domain Model

use crate::domain::catalog::MaterialId;
use crate::domain::error::{DomainError, Result};
use crate::domain::execution::ExecutionId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Consumption reported when a move is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialConsumption {
    pub material_id: MaterialId,
    pub quantity: i64,
}

/// Persisted `move_material_usage` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub id: i64,
    pub execution_id: ExecutionId,
    pub material_id: MaterialId,
    pub quantity: i64,
    pub created_at: i64,
}

/// Reject non-positive quantities and materials listed twice.
pub fn validate_consumption(items: &[MaterialConsumption]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if item.quantity <= 0 {
            return Err(DomainError::ValidationError(format!(
                "Quantity for material {} must be positive, got {}",
                item.material_id, item.quantity
            )));
        }
        if !seen.insert(item.material_id) {
            return Err(DomainError::ValidationError(format!(
                "Material {} listed more than once",
                item.material_id
            )));
        }
    }
    Ok(())
}
