//! Answering "who is on shift S on day D" from flat collections.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::roster::{Assignment, Employee};
use crate::types::{EmployeeId, ShiftId};

/// Resolve an assignment's employee reference against the known employees.
///
/// Returns `None` when the employee is missing from `employees`, which is how
/// references to purged or filtered-out employees are dropped from views.
#[must_use]
pub fn resolve_or_drop(employees: &[Employee], employee_id: EmployeeId) -> Option<&Employee> {
    employees.iter().find(|e| e.id == employee_id)
}

/// Employees assigned to `shift_id` on `date`, in assignment order.
///
/// Soft-deleted assignments are skipped and unresolvable employee references
/// are dropped. No result is cached; each call rescans `assignments`.
#[must_use]
pub fn employees_in_cell<'a>(
    assignments: &[Assignment],
    employees: &'a [Employee],
    shift_id: ShiftId,
    date: NaiveDate,
) -> Vec<&'a Employee> {
    assignments
        .iter()
        .filter(|a| a.occupies(shift_id, date))
        .filter_map(|a| resolve_or_drop(employees, a.employee_id))
        .collect()
}

/// An employee held by more than one live assignment on the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoubleBooking {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    /// Shift of every live assignment that day, in assignment order. A shift
    /// appears twice when the employee is booked into it twice.
    pub shift_ids: Vec<ShiftId>,
}

/// Every (employee, date) pair with two or more live assignments, ordered by
/// date then employee.
#[must_use]
pub fn find_double_bookings(assignments: &[Assignment]) -> Vec<DoubleBooking> {
    let mut by_day: BTreeMap<(NaiveDate, EmployeeId), Vec<ShiftId>> = BTreeMap::new();
    for a in assignments.iter().filter(|a| a.status.is_live()) {
        by_day
            .entry((a.date, a.employee_id))
            .or_default()
            .push(a.shift_id);
    }

    by_day
        .into_iter()
        .filter(|(_, shifts)| shifts.len() > 1)
        .map(|((date, employee_id), shift_ids)| DoubleBooking {
            employee_id,
            date,
            shift_ids,
        })
        .collect()
}
