//! The month view: weeks of day columns crossed with one row per shift.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::{self, DayLabel};
use super::lookup::employees_in_cell;
use crate::roster::{Assignment, Employee, Shift};
use crate::types::{EmployeeId, ShiftId};

/// How full a cell is against the shift's required headcount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Staffing {
    Empty,
    Under,
    Full,
    Over,
}

impl Staffing {
    /// Classify `assigned` employees against `required` (zero counts as one).
    #[must_use]
    pub fn classify(assigned: usize, required: usize) -> Self {
        let required = required.max(1);
        match assigned {
            0 => Self::Empty,
            n if n < required => Self::Under,
            n if n == required => Self::Full,
            _ => Self::Over,
        }
    }

    /// CSS-friendly name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Under => "under",
            Self::Full => "full",
            Self::Over => "over",
        }
    }
}

/// Column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    pub date: NaiveDate,
    pub key: String,
    pub label: DayLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellEmployee {
    pub id: EmployeeId,
    pub name: String,
}

/// One (shift, date) intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub key: String,
    pub employees: Vec<CellEmployee>,
    pub staffing: Staffing,
}

/// One shift across the days of a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftRow {
    pub shift_id: ShiftId,
    pub name: String,
    pub window: String,
    pub required: usize,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBlock {
    pub days: Vec<DayHeader>,
    pub rows: Vec<ShiftRow>,
}

/// A rendered month, week chunk by week chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleGrid {
    /// First day of the month.
    pub month: NaiveDate,
    pub weeks: Vec<WeekBlock>,
}

impl ScheduleGrid {
    /// Every cell in the grid.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.weeks
            .iter()
            .flat_map(|w| w.rows.iter())
            .flat_map(|r| r.cells.iter())
    }

    /// Number of cells whose staffing matches `staffing`.
    #[must_use]
    pub fn count(&self, staffing: Staffing) -> usize {
        self.cells().filter(|c| c.staffing == staffing).count()
    }
}

/// Lay out the month containing `anchor`.
///
/// Rows follow the order of `shifts`; callers pass the active shifts they want
/// displayed. Cells are resolved with [`employees_in_cell`].
#[must_use]
pub fn build_grid(
    anchor: NaiveDate,
    shifts: &[Shift],
    employees: &[Employee],
    assignments: &[Assignment],
) -> ScheduleGrid {
    let dates = calendar::month_dates(anchor);

    let weeks = calendar::week_chunks(&dates)
        .into_iter()
        .map(|week| WeekBlock {
            days: week
                .iter()
                .map(|&date| DayHeader {
                    date,
                    key: calendar::format_key(date),
                    label: calendar::format_display(date),
                })
                .collect(),
            rows: shifts
                .iter()
                .map(|shift| ShiftRow {
                    shift_id: shift.id,
                    name: shift.name.clone(),
                    window: shift.window.label(),
                    required: shift.headcount(),
                    cells: week
                        .iter()
                        .map(|&date| build_cell(shift, date, employees, assignments))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    ScheduleGrid {
        month: calendar::first_of_month(anchor),
        weeks,
    }
}

fn build_cell(
    shift: &Shift,
    date: NaiveDate,
    employees: &[Employee],
    assignments: &[Assignment],
) -> GridCell {
    let employees: Vec<CellEmployee> = employees_in_cell(assignments, employees, shift.id, date)
        .into_iter()
        .map(|e| CellEmployee {
            id: e.id,
            name: e.name.clone(),
        })
        .collect();

    GridCell {
        date,
        key: calendar::format_key(date),
        staffing: Staffing::classify(employees.len(), shift.headcount()),
        employees,
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::roster::fixtures::{assignment, date, employee, shift};

    #[test]
    fn test_classify() {
        assert_eq!(Staffing::classify(0, 2), Staffing::Empty);
        assert_eq!(Staffing::classify(1, 2), Staffing::Under);
        assert_eq!(Staffing::classify(2, 2), Staffing::Full);
        assert_eq!(Staffing::classify(3, 2), Staffing::Over);
        assert_eq!(Staffing::classify(1, 0), Staffing::Full);
    }

    #[test]
    fn test_grid_shape() {
        let shifts = vec![shift(1, "Morning", 2), shift(2, "Evening", 1)];
        let grid = build_grid(date(2024, 2, 14), &shifts, &[], &[]);

        assert_eq!(grid.month, date(2024, 2, 1));
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[4].days.len(), 1);
        for week in &grid.weeks {
            assert_eq!(week.rows.len(), 2);
            assert_eq!(week.rows[0].name, "Morning");
            for row in &week.rows {
                assert_eq!(row.cells.len(), week.days.len());
            }
        }
        assert_eq!(grid.count(Staffing::Empty), 29 * 2);
    }

    #[test]
    fn test_grid_cells_resolve_employees() {
        let day = date(2024, 2, 8);
        let shifts = vec![shift(1, "Morning", 2), shift(2, "Evening", 1)];
        let employees = vec![employee(1, "An"), employee(2, "Binh")];
        let assignments = vec![
            assignment(1, 1, 1, day),
            assignment(2, 2, 2, day),
            assignment(3, 1, 2, day),
            assignment(4, 42, 1, date(2024, 2, 9)),
        ];

        let grid = build_grid(day, &shifts, &employees, &assignments);
        // 2024-02-08 is the 8th day, so the first entry of the second chunk.
        let week = &grid.weeks[1];
        assert_eq!(week.days[0].key, "2024-02-08");
        assert_eq!(week.days[0].label.weekday, "T5");

        let morning = &week.rows[0].cells[0];
        assert_eq!(morning.staffing, Staffing::Under);
        assert_eq!(morning.employees[0].name, "An");

        let evening = &week.rows[1].cells[0];
        assert_eq!(evening.staffing, Staffing::Over);
        assert_eq!(evening.employees.len(), 2);

        // the orphaned reference on the 9th is dropped
        assert_eq!(week.rows[0].cells[1].staffing, Staffing::Empty);
        assert_eq!(grid.count(Staffing::Over), 1);
    }
}
