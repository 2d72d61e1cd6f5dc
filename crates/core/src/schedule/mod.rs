//! Pure scheduling logic: month calendars, cell lookups, and auto-assignment.

pub mod auto_assign;
pub mod calendar;
pub mod grid;
pub mod lookup;

pub use auto_assign::{AssignmentPlan, plan_month, plan_round_robin};
pub use calendar::{CalendarError, DateRange, DayLabel};
pub use grid::{CellEmployee, DayHeader, GridCell, ScheduleGrid, ShiftRow, Staffing, WeekBlock, build_grid};
pub use lookup::{DoubleBooking, employees_in_cell, find_double_bookings, resolve_or_drop};
