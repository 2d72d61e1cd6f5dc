//! Core types for Shift Planner.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod phone;
pub mod status;
pub mod time_of_day;

pub use email::{Email, EmailError};
pub use id::*;
pub use phone::{PhoneError, PhoneNumber};
pub use status::*;
pub use time_of_day::{ShiftWindow, TimeOfDay, TimeOfDayError};
