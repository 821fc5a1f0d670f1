// Time Record Domain Model

use crate::domain::execution::ExecutionId;
use crate::domain::catalog::EmployeeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type TimeRecordId = i64;

/// One employee's working segment within an execution (epoch ms timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub id: TimeRecordId,
    pub execution_id: ExecutionId,
    pub employee_id: EmployeeId,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub break_start: Option<i64>,
    pub break_end: Option<i64>,
}

impl TimeRecord {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn on_break(&self) -> bool {
        self.break_start.is_some() && self.break_end.is_none()
    }

    /// Worked time in ms; open intervals are measured up to `now`.
    pub fn worked_millis(&self, now: i64) -> i64 {
        let end = self.end_time.unwrap_or(now);
        let total = end - self.start_time;

        let on_break = match self.break_start {
            Some(break_start) => {
                // A break cannot outlast the segment it belongs to
                let break_end = self.break_end.unwrap_or(end).min(end);
                (break_end - break_start).max(0)
            }
            None => 0,
        };

        (total - on_break).max(0)
    }
}

/// Time record joined with the employee's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecordView {
    #[serde(flatten)]
    pub record: TimeRecord,
    pub employee_name: String,
}

/// Aggregated worked time of one employee across all their segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedTime {
    pub employee_id: EmployeeId,
    pub segments: usize,
    pub worked_millis: i64,
}

/// Sum worked time per employee, ordered by employee id.
pub fn summarize_worked_time<'a>(
    records: impl IntoIterator<Item = &'a TimeRecord>,
    now: i64,
) -> Vec<WorkedTime> {
    let mut totals: BTreeMap<EmployeeId, WorkedTime> = BTreeMap::new();

    for record in records {
        let entry = totals.entry(record.employee_id).or_insert(WorkedTime {
            employee_id: record.employee_id,
            segments: 0,
            worked_millis: 0,
        });
        entry.segments += 1;
        entry.worked_millis += record.worked_millis(now);
    }

    totals.into_values().collect()
}
