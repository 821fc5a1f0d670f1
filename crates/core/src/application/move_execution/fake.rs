// In-memory repository used by the service tests
//
// A transaction works on a private copy of the state and swaps it in on
// commit, so a dropped or rolled back transaction leaves nothing behind.

use crate::domain::{
    ActiveExecution, Deal, DealId, Employee, EmployeeId, ExecutionId, ExecutionStatus, Material,
    MaterialId, MaterialUsage, MoveExecution, TimeRecord, TimeRecordId, TimeRecordView,
};
use crate::error::{AppError, Result};
use crate::port::{MoveRepository, MoveRepositoryTransaction, Transaction, TransactionalMoveRepository};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct FakeState {
    pub deals: BTreeMap<DealId, Deal>,
    pub employees: BTreeMap<EmployeeId, Employee>,
    pub materials: BTreeMap<MaterialId, Material>,
    pub executions: BTreeMap<ExecutionId, MoveExecution>,
    pub time_records: BTreeMap<TimeRecordId, TimeRecord>,
    pub usage: Vec<MaterialUsage>,
}

fn next_id<V>(map: &BTreeMap<i64, V>) -> i64 {
    map.keys().next_back().map_or(1, |id| id + 1)
}

#[derive(Default)]
struct Shared {
    state: Mutex<FakeState>,
    /// 1-based index of the time record insert (within one transaction) that fails
    fail_time_record_insert: Mutex<Option<usize>>,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct FakeMoveStore {
    shared: Arc<Shared>,
}

impl FakeMoveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deal(self, id: DealId, title: &str) -> Self {
        self.edit(|s| {
            s.deals.insert(
                id,
                Deal {
                    id,
                    pipedrive_id: None,
                    title: title.to_string(),
                    customer_name: Some(format!("Customer of {}", title)),
                    origin_address: Some("Hauptstrasse 1".to_string()),
                    destination_address: Some("Ringweg 9".to_string()),
                    move_date: Some("2026-05-04".to_string()),
                    value: Some(1200.0),
                    status: Some("won".to_string()),
                },
            );
        });
        self
    }

    pub fn with_employee(self, id: EmployeeId, first: &str, last: &str) -> Self {
        self.edit(|s| {
            s.employees.insert(
                id,
                Employee {
                    id,
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    role: Some("mover".to_string()),
                    is_active: true,
                },
            );
        });
        self
    }

    pub fn with_material(self, id: MaterialId, name: &str, stock: i64) -> Self {
        self.edit(|s| {
            s.materials.insert(
                id,
                Material {
                    id,
                    name: name.to_string(),
                    unit: Some("pcs".to_string()),
                    current_stock: stock,
                    min_stock: 0,
                },
            );
        });
        self
    }

    pub fn fail_on_time_record_insert(&self, nth: usize) {
        *self.shared.fail_time_record_insert.lock().unwrap() = Some(nth);
    }

    pub fn edit(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.shared.state.lock().unwrap());
    }

    pub fn snapshot(&self) -> FakeState {
        self.shared.state.lock().unwrap().clone()
    }

    pub fn commits(&self) -> usize {
        self.shared.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.shared.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MoveRepository for FakeMoveStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn find_execution(&self, id: ExecutionId) -> Result<Option<MoveExecution>> {
        Ok(self.snapshot().executions.get(&id).cloned())
    }

    async fn find_deal(&self, id: DealId) -> Result<Option<Deal>> {
        Ok(self.snapshot().deals.get(&id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<ActiveExecution>> {
        let state = self.snapshot();
        let mut rows: Vec<ActiveExecution> = state
            .executions
            .values()
            .filter(|e| e.status.is_active())
            .filter_map(|e| {
                let deal = state.deals.get(&e.deal_id)?;
                Some(ActiveExecution {
                    id: e.id,
                    deal_id: e.deal_id,
                    status: e.status,
                    start_time: e.start_time,
                    end_time: e.end_time,
                    notes: e.notes.clone(),
                    created_at: e.created_at,
                    deal_title: deal.title.clone(),
                    customer_name: deal.customer_name.clone(),
                    origin_address: deal.origin_address.clone(),
                    destination_address: deal.destination_address.clone(),
                    move_date: deal.move_date.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn list_time_records(&self, execution_id: ExecutionId) -> Result<Vec<TimeRecordView>> {
        let state = self.snapshot();
        let mut rows: Vec<TimeRecordView> = state
            .time_records
            .values()
            .filter(|r| r.execution_id == execution_id)
            .map(|r| TimeRecordView {
                record: r.clone(),
                employee_name: state
                    .employees
                    .get(&r.employee_id)
                    .map(|e| e.display_name())
                    .unwrap_or_default(),
            })
            .collect();
        rows.sort_by_key(|v| (v.record.start_time, v.record.id));
        Ok(rows)
    }

    async fn list_material_usage(&self, execution_id: ExecutionId) -> Result<Vec<MaterialUsage>> {
        Ok(self
            .snapshot()
            .usage
            .into_iter()
            .filter(|u| u.execution_id == execution_id)
            .collect())
    }
}

#[async_trait]
impl TransactionalMoveRepository for FakeMoveStore {
    async fn begin_transaction(&self) -> Result<Box<dyn MoveRepositoryTransaction>> {
        Ok(Box::new(FakeTransaction {
            shared: Arc::clone(&self.shared),
            working: self.snapshot(),
            time_record_inserts: 0,
        }))
    }
}

struct FakeTransaction {
    shared: Arc<Shared>,
    working: FakeState,
    time_record_inserts: usize,
}

#[async_trait]
impl Transaction for FakeTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        let FakeTransaction { shared, working, .. } = *self;
        *shared.state.lock().unwrap() = working;
        shared.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.shared.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl MoveRepositoryTransaction for FakeTransaction {
    async fn find_deal(&mut self, id: DealId) -> Result<Option<Deal>> {
        Ok(self.working.deals.get(&id).cloned())
    }

    async fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>> {
        Ok(self.working.employees.get(&id).cloned())
    }

    async fn find_execution(&mut self, id: ExecutionId) -> Result<Option<MoveExecution>> {
        Ok(self.working.executions.get(&id).cloned())
    }

    async fn open_time_records(&mut self, execution_id: ExecutionId) -> Result<Vec<TimeRecord>> {
        Ok(self
            .working
            .time_records
            .values()
            .filter(|r| r.execution_id == execution_id && r.is_open())
            .cloned()
            .collect())
    }

    async fn insert_execution(
        &mut self,
        deal_id: DealId,
        status: ExecutionStatus,
        now: i64,
    ) -> Result<ExecutionId> {
        let id = next_id(&self.working.executions);
        self.working.executions.insert(
            id,
            MoveExecution {
                id,
                deal_id,
                status,
                start_time: Some(now),
                end_time: None,
                notes: None,
                created_at: now,
            },
        );
        Ok(id)
    }

    async fn insert_time_record(
        &mut self,
        execution_id: ExecutionId,
        employee_id: EmployeeId,
        start_time: i64,
        break_start: Option<i64>,
    ) -> Result<TimeRecordId> {
        self.time_record_inserts += 1;
        if *self.shared.fail_time_record_insert.lock().unwrap() == Some(self.time_record_inserts) {
            return Err(AppError::Database("injected time record failure".to_string()));
        }

        let id = next_id(&self.working.time_records);
        self.working.time_records.insert(
            id,
            TimeRecord {
                id,
                execution_id,
                employee_id,
                start_time,
                end_time: None,
                break_start,
                break_end: None,
            },
        );
        Ok(id)
    }

    async fn update_status(&mut self, id: ExecutionId, status: ExecutionStatus) -> Result<()> {
        let execution = self
            .working
            .executions
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Move execution", id))?;
        execution.status = status;
        Ok(())
    }

    async fn start_breaks(&mut self, execution_id: ExecutionId, now: i64) -> Result<u64> {
        let mut count = 0;
        for r in self.working.time_records.values_mut() {
            if r.execution_id == execution_id && r.is_open() && r.break_start.is_none() {
                r.break_start = Some(now);
                count += 1;
            }
        }
        Ok(count)
    }

    async fn end_breaks(&mut self, execution_id: ExecutionId, now: i64) -> Result<u64> {
        let mut count = 0;
        for r in self.working.time_records.values_mut() {
            if r.execution_id == execution_id && r.on_break() {
                r.break_end = Some(now);
                count += 1;
            }
        }
        Ok(count)
    }

    async fn close_time_record(&mut self, id: TimeRecordId, now: i64) -> Result<()> {
        if let Some(r) = self.working.time_records.get_mut(&id) {
            r.end_time = Some(now);
        }
        Ok(())
    }

    async fn close_time_records(&mut self, execution_id: ExecutionId, now: i64) -> Result<u64> {
        let mut count = 0;
        for r in self.working.time_records.values_mut() {
            if r.execution_id == execution_id && r.is_open() {
                r.end_time = Some(now);
                count += 1;
            }
        }
        Ok(count)
    }

    async fn finish_execution(
        &mut self,
        id: ExecutionId,
        now: i64,
        notes: Option<&str>,
    ) -> Result<()> {
        let execution = self
            .working
            .executions
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Move execution", id))?;
        execution.status = ExecutionStatus::Completed;
        execution.end_time = Some(now);
        execution.notes = notes.map(str::to_string);
        Ok(())
    }

    async fn insert_material_usage(
        &mut self,
        execution_id: ExecutionId,
        material_id: MaterialId,
        quantity: i64,
        now: i64,
    ) -> Result<()> {
        let id = self.working.usage.len() as i64 + 1;
        self.working.usage.push(MaterialUsage {
            id,
            execution_id,
            material_id,
            quantity,
            created_at: now,
        });
        Ok(())
    }

    async fn decrement_stock(
        &mut self,
        material_id: MaterialId,
        quantity: i64,
    ) -> Result<Option<i64>> {
        Ok(self.working.materials.get_mut(&material_id).map(|m| {
            m.current_stock -= quantity;
            m.current_stock
        }))
    }
}
