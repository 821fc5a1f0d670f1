// Reference data owned by other parts of the business (CRM deals, staff, stock)

use crate::domain::execution::DealId;
use serde::{Deserialize, Serialize};

pub type EmployeeId = i64;
pub type MaterialId = i64;

/// A sold moving job, synced from the CRM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub pipedrive_id: Option<i64>,
    pub title: String,
    pub customer_name: Option<String>,
    pub origin_address: Option<String>,
    pub destination_address: Option<String>,
    pub move_date: Option<String>,
    pub value: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub is_active: bool,
}

impl Employee {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Stocked consumable (boxes, tape, blankets, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub unit: Option<String>,
    pub current_stock: i64,
    pub min_stock: i64,
}
