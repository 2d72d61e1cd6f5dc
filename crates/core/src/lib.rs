//! Shift Planner Core - domain types and scheduling logic.
//!
//! This crate is shared by the web server and the CLI:
//! - `web` - Month grid, employee and shift management, assignments API
//! - `cli` - Migrations, demo data, and scheduling from the terminal
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Persistence lives behind the web crate's repositories.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email, phone, time-of-day and status enums
//! - [`roster`] - Employees, shifts, and assignments
//! - [`schedule`] - Month calendars, cell lookup, grid layout, auto-assignment
//! - [`validation`] - Form validation for employees and shifts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod roster;
pub mod schedule;
pub mod types;
pub mod validation;

pub use roster::{Assignment, AssignmentPatch, Employee, NewAssignment, Shift};
pub use types::*;
pub use validation::{
    EmployeeDraft, EmployeeInput, FieldError, ShiftDraft, ShiftInput, ValidationErrors,
};
