// SQLite row representations and their conversion into domain types

use moveops_core::domain::{
    ActiveExecution, Deal, Employee, ExecutionStatus, MaterialUsage, MoveExecution, TimeRecord,
    TimeRecordView,
};
use moveops_core::error::{AppError, Result};

fn parse_status(raw: &str) -> Result<ExecutionStatus> {
    raw.parse()
        .map_err(|e| AppError::Database(format!("Corrupt move_executions.status: {}", e)))
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ExecutionRow {
    id: i64,
    deal_id: i64,
    status: String,
    start_time: Option<i64>,
    end_time: Option<i64>,
    notes: Option<String>,
    created_at: i64,
}

impl ExecutionRow {
    pub(crate) fn into_execution(self) -> Result<MoveExecution> {
        Ok(MoveExecution {
            id: self.id,
            deal_id: self.deal_id,
            status: parse_status(&self.status)?,
            start_time: self.start_time,
            end_time: self.end_time,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ActiveExecutionRow {
    id: i64,
    deal_id: i64,
    status: String,
    start_time: Option<i64>,
    end_time: Option<i64>,
    notes: Option<String>,
    created_at: i64,
    deal_title: String,
    customer_name: Option<String>,
    origin_address: Option<String>,
    destination_address: Option<String>,
    move_date: Option<String>,
}

impl ActiveExecutionRow {
    pub(crate) fn into_active(self) -> Result<ActiveExecution> {
        Ok(ActiveExecution {
            id: self.id,
            deal_id: self.deal_id,
            status: parse_status(&self.status)?,
            start_time: self.start_time,
            end_time: self.end_time,
            notes: self.notes,
            created_at: self.created_at,
            deal_title: self.deal_title,
            customer_name: self.customer_name,
            origin_address: self.origin_address,
            destination_address: self.destination_address,
            move_date: self.move_date,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TimeRecordRow {
    id: i64,
    execution_id: i64,
    employee_id: i64,
    start_time: i64,
    end_time: Option<i64>,
    break_start: Option<i64>,
    break_end: Option<i64>,
}

impl From<TimeRecordRow> for TimeRecord {
    fn from(row: TimeRecordRow) -> Self {
        TimeRecord {
            id: row.id,
            execution_id: row.execution_id,
            employee_id: row.employee_id,
            start_time: row.start_time,
            end_time: row.end_time,
            break_start: row.break_start,
            break_end: row.break_end,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TimeRecordViewRow {
    #[sqlx(flatten)]
    record: TimeRecordRow,
    employee_name: String,
}

impl From<TimeRecordViewRow> for TimeRecordView {
    fn from(row: TimeRecordViewRow) -> Self {
        TimeRecordView {
            record: row.record.into(),
            employee_name: row.employee_name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct DealRow {
    id: i64,
    pipedrive_id: Option<i64>,
    title: String,
    customer_name: Option<String>,
    origin_address: Option<String>,
    destination_address: Option<String>,
    move_date: Option<String>,
    value: Option<f64>,
    status: Option<String>,
}

impl From<DealRow> for Deal {
    fn from(row: DealRow) -> Self {
        Deal {
            id: row.id,
            pipedrive_id: row.pipedrive_id,
            title: row.title,
            customer_name: row.customer_name,
            origin_address: row.origin_address,
            destination_address: row.destination_address,
            move_date: row.move_date,
            value: row.value,
            status: row.status,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EmployeeRow {
    id: i64,
    first_name: String,
    last_name: String,
    role: Option<String>,
    is_active: i64, // SQLite boolean as integer
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role,
            is_active: row.is_active != 0,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MaterialUsageRow {
    id: i64,
    execution_id: i64,
    material_id: i64,
    quantity: i64,
    created_at: i64,
}

impl From<MaterialUsageRow> for MaterialUsage {
    fn from(row: MaterialUsageRow) -> Self {
        MaterialUsage {
            id: row.id,
            execution_id: row.execution_id,
            material_id: row.material_id,
            quantity: row.quantity,
            created_at: row.created_at,
        }
    }
}
