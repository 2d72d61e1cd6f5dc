//! The slice of persistence the scheduling service depends on.
//!
//! [`PgRosterStore`] backs the server and CLI; [`MemoryRosterStore`] keeps
//! everything in a mutex-guarded `Vec` for tests and dry runs.

mod memory;
mod postgres;

use std::future::Future;

use shift_planner_core::schedule::DateRange;
use shift_planner_core::{Assignment, Employee, NewAssignment, Shift};

use crate::db::RepositoryError;

pub use memory::MemoryRosterStore;
pub use postgres::PgRosterStore;

/// Reads and writes needed to lay out and auto-fill a month.
pub trait RosterStore: Send + Sync {
    /// Active employees, sorted by name.
    fn active_employees(&self)
    -> impl Future<Output = Result<Vec<Employee>, RepositoryError>> + Send;

    /// Active shifts, sorted by name.
    fn active_shifts(&self) -> impl Future<Output = Result<Vec<Shift>, RepositoryError>> + Send;

    /// Every assignment dated inside `range`, deleted ones included.
    fn assignments_between(
        &self,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<Assignment>, RepositoryError>> + Send;

    fn create_assignment(
        &self,
        new: &NewAssignment,
    ) -> impl Future<Output = Result<Assignment, RepositoryError>> + Send;

    /// Hard delete inside `range`; returns the number removed.
    fn delete_assignments_between(
        &self,
        range: DateRange,
    ) -> impl Future<Output = Result<u64, RepositoryError>> + Send;
}
