//! Business logic services.
//!
//! # Services
//!
//! - `scheduling` - Month grid assembly, auto-assignment, range clearing

pub mod scheduling;

pub use scheduling::{AutoAssignReport, MonthSchedule, SchedulingService};
