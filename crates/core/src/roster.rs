//! Roster entities: employees, shifts, and the assignments joining them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    AssignmentId, AssignmentStatus, Email, EmployeeId, PhoneNumber, ShiftId, ShiftWindow,
};

/// A person who can be put on a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub position: Option<String>,
    /// Soft-delete marker; `false` hides the employee from every active list.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named work slot ("deadline") with an optional time window and headcount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub name: String,
    pub description: Option<String>,
    pub window: ShiftWindow,
    /// How many employees each day of this shift should hold.
    pub required_employees: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shift {
    /// Headcount used when filling slots; legacy zero values count as one.
    #[must_use]
    pub fn headcount(&self) -> usize {
        usize::try_from(self.required_employees.max(1)).unwrap_or(usize::MAX)
    }
}

/// One employee bound to one shift on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub employee_id: EmployeeId,
    pub shift_id: ShiftId,
    pub date: NaiveDate,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    /// Whether this assignment sits in the given cell and is not soft-deleted.
    #[must_use]
    pub fn occupies(&self, shift_id: ShiftId, date: NaiveDate) -> bool {
        self.shift_id == shift_id && self.date == date && self.status.is_live()
    }
}

/// An assignment that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssignment {
    pub employee_id: EmployeeId,
    pub shift_id: ShiftId,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: AssignmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewAssignment {
    /// A plain `assigned` record with no notes.
    #[must_use]
    pub const fn assigned(employee_id: EmployeeId, shift_id: ShiftId, date: NaiveDate) -> Self {
        Self {
            employee_id,
            shift_id,
            date,
            status: AssignmentStatus::Assigned,
            notes: None,
        }
    }
}

/// Partial update for an existing assignment; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPatch {
    pub employee_id: Option<EmployeeId>,
    pub shift_id: Option<ShiftId>,
    pub date: Option<NaiveDate>,
    pub status: Option<AssignmentStatus>,
    pub notes: Option<String>,
}

impl AssignmentPatch {
    /// Apply the patch to an in-memory copy.
    pub fn apply_to(&self, assignment: &mut Assignment) {
        if let Some(employee_id) = self.employee_id {
            assignment.employee_id = employee_id;
        }
        if let Some(shift_id) = self.shift_id {
            assignment.shift_id = shift_id;
        }
        if let Some(date) = self.date {
            assignment.date = date;
        }
        if let Some(status) = self.status {
            assignment.status = status;
        }
        if let Some(notes) = &self.notes {
            assignment.notes = Some(notes.clone());
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_headcount_treats_zero_as_one() {
        assert_eq!(shift(1, "Morning", 0).headcount(), 1);
        assert_eq!(shift(1, "Morning", 3).headcount(), 3);
    }

    #[test]
    fn test_occupies_ignores_deleted() {
        let day = date(2024, 5, 1);
        let mut a = assignment(1, 1, 9, day);
        assert!(a.occupies(ShiftId::new(9), day));
        assert!(!a.occupies(ShiftId::new(8), day));

        a.status = AssignmentStatus::Deleted;
        assert!(!a.occupies(ShiftId::new(9), day));
    }

    #[test]
    fn test_patch_only_touches_set_fields() {
        let day = date(2024, 5, 1);
        let mut a = assignment(1, 1, 9, day);
        AssignmentPatch {
            status: Some(AssignmentStatus::Completed),
            notes: Some("covered late".to_string()),
            ..AssignmentPatch::default()
        }
        .apply_to(&mut a);

        assert_eq!(a.status, AssignmentStatus::Completed);
        assert_eq!(a.notes.as_deref(), Some("covered late"));
        assert_eq!(a.employee_id, EmployeeId::new(1));
        assert_eq!(a.date, day);
    }
}
