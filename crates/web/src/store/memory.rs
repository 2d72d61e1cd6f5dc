use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use shift_planner_core::schedule::DateRange;
use shift_planner_core::{
    Assignment, AssignmentId, Employee, EmployeeId, NewAssignment, Shift,
};

use super::RosterStore;
use crate::db::RepositoryError;

#[derive(Debug, Default)]
struct State {
    employees: Vec<Employee>,
    shifts: Vec<Shift>,
    assignments: Vec<Assignment>,
    next_assignment_id: i32,
}

/// In-process [`RosterStore`].
///
/// Creates for the employee given to [`Self::fail_creates_for`] return an
/// error, which is how partial auto-assign failures are exercised.
#[derive(Debug, Default)]
pub struct MemoryRosterStore {
    state: Mutex<State>,
    failing_employee: Option<EmployeeId>,
}

impl MemoryRosterStore {
    #[must_use]
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        Self {
            state: Mutex::new(State {
                employees,
                shifts,
                assignments: Vec::new(),
                next_assignment_id: 1,
            }),
            failing_employee: None,
        }
    }

    /// Make every create for `employee_id` fail.
    #[must_use]
    pub const fn fail_creates_for(mut self, employee_id: EmployeeId) -> Self {
        self.failing_employee = Some(employee_id);
        self
    }

    /// Store `new` as if it had been created earlier.
    pub fn insert(&self, new: NewAssignment) -> Assignment {
        let mut state = self.lock();
        let assignment = materialize(&mut state, new);
        state.assignments.push(assignment.clone());
        assignment
    }

    /// Snapshot of every stored assignment in insertion order.
    #[must_use]
    pub fn assignments(&self) -> Vec<Assignment> {
        self.lock().assignments.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn materialize(state: &mut State, new: NewAssignment) -> Assignment {
    let id = state.next_assignment_id.max(1);
    state.next_assignment_id = id.saturating_add(1);
    let now = Utc::now();
    Assignment {
        id: AssignmentId::new(id),
        employee_id: new.employee_id,
        shift_id: new.shift_id,
        date: new.date,
        status: new.status,
        notes: new.notes,
        created_at: now,
        updated_at: now,
    }
}

impl RosterStore for MemoryRosterStore {
    async fn active_employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        let mut employees: Vec<Employee> =
            self.lock().employees.iter().filter(|e| e.active).cloned().collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(employees)
    }

    async fn active_shifts(&self) -> Result<Vec<Shift>, RepositoryError> {
        let mut shifts: Vec<Shift> =
            self.lock().shifts.iter().filter(|s| s.active).cloned().collect();
        shifts.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(shifts)
    }

    async fn assignments_between(&self, range: DateRange) -> Result<Vec<Assignment>, RepositoryError> {
        let mut found: Vec<Assignment> = self
            .lock()
            .assignments
            .iter()
            .filter(|a| range.contains(a.date))
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.date, a.shift_id, a.id));
        Ok(found)
    }

    async fn create_assignment(&self, new: &NewAssignment) -> Result<Assignment, RepositoryError> {
        if self.failing_employee == Some(new.employee_id) {
            return Err(RepositoryError::Conflict(format!(
                "create rejected for employee {}",
                new.employee_id
            )));
        }
        Ok(self.insert(new.clone()))
    }

    async fn delete_assignments_between(&self, range: DateRange) -> Result<u64, RepositoryError> {
        let mut state = self.lock();
        let before = state.assignments.len();
        state.assignments.retain(|a| !range.contains(a.date));
        Ok(u64::try_from(before - state.assignments.len()).unwrap_or(u64::MAX))
    }
}
