//! Round-robin planning of a month's assignments.
//!
//! The planner is pure: it decides which records to create and leaves the
//! clearing and persisting to the caller.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar;
use crate::roster::{Employee, NewAssignment, Shift};

/// Records to create, plus where the employee cursor ended up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentPlan {
    pub assignments: Vec<NewAssignment>,
    /// Cursor after the last record; feed it back in to continue the rotation.
    pub cursor: usize,
}

impl AssignmentPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Cycle active employees through every (shift, date) slot.
///
/// Shifts are walked in the given order and dates ascending as given. Each slot
/// receives `min(headcount, active employees)` records, each taking the
/// employee at `cursor % len` and advancing the cursor. The same employee can
/// land on two shifts of one day; nothing here prevents it.
///
/// Inactive employees and shifts are skipped. With no active employees the
/// plan is empty and the cursor is returned unchanged.
#[must_use]
pub fn plan_round_robin(
    employees: &[Employee],
    shifts: &[Shift],
    dates: &[NaiveDate],
    cursor: usize,
) -> AssignmentPlan {
    let active: Vec<&Employee> = employees.iter().filter(|e| e.active).collect();
    if active.is_empty() {
        return AssignmentPlan {
            assignments: Vec::new(),
            cursor,
        };
    }

    let mut plan = AssignmentPlan {
        assignments: Vec::new(),
        cursor,
    };

    for shift in shifts.iter().filter(|s| s.active) {
        let per_slot = shift.headcount().min(active.len());
        for &date in dates {
            for _ in 0..per_slot {
                if let Some(employee) = active.get(plan.cursor % active.len()) {
                    plan.assignments
                        .push(NewAssignment::assigned(employee.id, shift.id, date));
                }
                plan.cursor = plan.cursor.wrapping_add(1);
            }
        }
    }

    plan
}

/// Plan the whole month containing `anchor`, starting the rotation at zero.
#[must_use]
pub fn plan_month(anchor: NaiveDate, employees: &[Employee], shifts: &[Shift]) -> AssignmentPlan {
    plan_round_robin(employees, shifts, &calendar::month_dates(anchor), 0)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::roster::fixtures::{date, employee, shift};
    use crate::schedule::find_double_bookings;
    use crate::types::{AssignmentStatus, EmployeeId, ShiftId};

    fn staff(n: i32) -> Vec<Employee> {
        (0..n).map(|i| employee(i, &format!("E{i}"))).collect()
    }

    fn ids(plan: &AssignmentPlan) -> Vec<i32> {
        plan.assignments.iter().map(|a| a.employee_id.as_i32()).collect()
    }

    #[test]
    fn test_rotation_carries_across_slots() {
        let dates = [date(2024, 5, 1), date(2024, 5, 2), date(2024, 5, 3)];
        let plan = plan_round_robin(&staff(5), &[shift(1, "Morning", 2)], &dates, 0);

        assert_eq!(plan.len(), 6);
        assert_eq!(ids(&plan), [0, 1, 2, 3, 4, 0]);
        assert_eq!(plan.cursor, 6);

        let on = |d| {
            plan.assignments
                .iter()
                .filter(|a| a.date == d)
                .map(|a| a.employee_id.as_i32())
                .collect::<Vec<_>>()
        };
        assert_eq!(on(dates[0]), [0, 1]);
        assert_eq!(on(dates[1]), [2, 3]);
        assert_eq!(on(dates[2]), [4, 0]);
        assert!(plan
            .assignments
            .iter()
            .all(|a| a.status == AssignmentStatus::Assigned && a.shift_id == ShiftId::new(1)));
    }

    #[test]
    fn test_no_active_employees_plans_nothing() {
        let mut team = staff(2);
        for e in &mut team {
            e.active = false;
        }
        let dates = [date(2024, 5, 1)];

        let plan = plan_round_robin(&team, &[shift(1, "Morning", 2)], &dates, 3);
        assert!(plan.is_empty());
        assert_eq!(plan.cursor, 3);

        assert!(plan_round_robin(&[], &[shift(1, "Morning", 2)], &dates, 0).is_empty());
    }

    #[test]
    fn test_headcount_capped_by_team_size() {
        let dates = [date(2024, 5, 1), date(2024, 5, 2)];
        let plan = plan_round_robin(&staff(2), &[shift(1, "Delivery", 3)], &dates, 0);
        assert_eq!(ids(&plan), [0, 1, 0, 1]);
    }

    #[test]
    fn test_zero_headcount_counts_as_one() {
        let dates = [date(2024, 5, 1), date(2024, 5, 2)];
        let plan = plan_round_robin(&staff(3), &[shift(1, "Legacy", 0)], &dates, 0);
        assert_eq!(ids(&plan), [0, 1]);
    }

    #[test]
    fn test_inactive_shifts_and_employees_skipped() {
        let mut team = staff(3);
        team[1].active = false;
        let mut closed = shift(2, "Closed", 1);
        closed.active = false;
        let dates = [date(2024, 5, 1), date(2024, 5, 2)];

        let plan = plan_round_robin(&team, &[closed, shift(1, "Open", 1)], &dates, 0);
        assert_eq!(ids(&plan), [0, 2]);
        assert!(plan.assignments.iter().all(|a| a.shift_id == ShiftId::new(1)));
    }

    #[test]
    fn test_cursor_is_shared_across_shifts() {
        let dates = [date(2024, 5, 1)];
        let shifts = [shift(1, "Morning", 2), shift(2, "Evening", 2)];
        let plan = plan_round_robin(&staff(3), &shifts, &dates, 0);

        assert_eq!(ids(&plan), [0, 1, 2, 0]);

        // Employee 0 works both shifts that day.
        let doubles = find_double_bookings(
            &plan
                .assignments
                .iter()
                .enumerate()
                .map(|(i, a)| {
                    let mut stored = crate::roster::fixtures::assignment(
                        i32::try_from(i).unwrap_or_default(),
                        a.employee_id.as_i32(),
                        a.shift_id.as_i32(),
                        a.date,
                    );
                    stored.status = a.status;
                    stored
                })
                .collect::<Vec<_>>(),
        );
        assert_eq!(doubles.len(), 1);
        assert_eq!(doubles[0].employee_id, EmployeeId::new(0));
    }

    #[test]
    fn test_deterministic_and_resumable() {
        let dates = [date(2024, 5, 1), date(2024, 5, 2)];
        let shifts = [shift(1, "Morning", 2)];
        let team = staff(3);

        assert_eq!(
            plan_round_robin(&team, &shifts, &dates, 0),
            plan_round_robin(&team, &shifts, &dates, 0)
        );

        let first = plan_round_robin(&team, &shifts, &dates[..1], 0);
        let second = plan_round_robin(&team, &shifts, &dates[1..], first.cursor);
        assert_eq!(ids(&second), [2, 0]);
    }

    #[test]
    fn test_plan_month_covers_every_day() {
        let plan = plan_month(date(2024, 2, 20), &staff(4), &[shift(1, "Morning", 1)]);
        assert_eq!(plan.len(), 29);
        assert_eq!(plan.assignments[0].date, date(2024, 2, 1));
        assert_eq!(plan.assignments[28].date, date(2024, 2, 29));
    }
}
