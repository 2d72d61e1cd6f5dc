//! Validation of the employee and shift forms.
//!
//! Drafts hold raw form strings. `validate` trims them, turns blanks into
//! `None`, checks every field, and reports all failures at once.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Email, PhoneNumber, ShiftWindow, TimeOfDay};

/// Smallest headcount a shift may require.
pub const MIN_REQUIRED_EMPLOYEES: u32 = 1;
/// Largest headcount a shift may require.
pub const MAX_REQUIRED_EMPLOYEES: u32 = 50;

/// A single failed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First message recorded for `field`.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// HTML checkboxes submit a value only when ticked.
fn checkbox(value: Option<&str>) -> bool {
    value.is_some_and(|v| !matches!(v.trim(), "false" | "off" | "0"))
}

/// Raw employee form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeDraft {
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub active: Option<String>,
}

/// A validated employee, ready to insert or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub position: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl EmployeeDraft {
    /// # Errors
    ///
    /// Returns every failed field: a blank name, an email that is not
    /// `local@domain.tld`, or a phone with characters other than digits,
    /// `+`, `-`, spaces and parentheses.
    pub fn validate(&self) -> Result<EmployeeInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = non_blank(Some(self.name.as_str()));
        if name.is_none() {
            errors.push("name", "Name is required");
        }

        let email = match non_blank(self.email.as_deref()).map(|e| Email::parse(&e)) {
            Some(Ok(email)) => Some(email),
            Some(Err(e)) => {
                errors.push("email", format!("Invalid email: {e}"));
                None
            }
            None => None,
        };

        let phone = match non_blank(self.phone.as_deref()).map(|p| PhoneNumber::parse(&p)) {
            Some(Ok(phone)) => Some(phone),
            Some(Err(e)) => {
                errors.push("phone", format!("Invalid phone number: {e}"));
                None
            }
            None => None,
        };

        let position = non_blank(self.position.as_deref());
        let active = checkbox(self.active.as_deref());

        errors.into_result(|| EmployeeInput {
            name: name.unwrap_or_default(),
            email,
            phone,
            position,
            active,
        })
    }
}

/// Raw shift form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShiftDraft {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub required_employees: Option<String>,
    pub active: Option<String>,
}

/// A validated shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub window: ShiftWindow,
    pub required_employees: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl ShiftDraft {
    /// # Errors
    ///
    /// Returns every failed field: a blank name, an unparseable time, a start
    /// not strictly before the end, or a headcount outside 1..=50. A blank
    /// headcount means 1.
    pub fn validate(&self) -> Result<ShiftInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = non_blank(Some(self.name.as_str()));
        if name.is_none() {
            errors.push("name", "Shift name is required");
        }

        let mut time = |field: &'static str, raw: Option<&str>| match non_blank(raw)
            .map(|t| TimeOfDay::parse(&t))
        {
            Some(Ok(t)) => Some(t),
            Some(Err(e)) => {
                errors.push(field, e.to_string());
                None
            }
            None => None,
        };
        let start = time("start_time", self.start_time.as_deref());
        let end = time("end_time", self.end_time.as_deref());

        let window = ShiftWindow::new(start, end);
        if !window.is_ordered() {
            errors.push("end_time", "Start time must be before end time");
        }

        let required_employees = match non_blank(self.required_employees.as_deref()) {
            None => MIN_REQUIRED_EMPLOYEES,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if (MIN_REQUIRED_EMPLOYEES..=MAX_REQUIRED_EMPLOYEES).contains(&n) => n,
                _ => {
                    errors.push(
                        "required_employees",
                        format!(
                            "Required employees must be between {MIN_REQUIRED_EMPLOYEES} and {MAX_REQUIRED_EMPLOYEES}"
                        ),
                    );
                    MIN_REQUIRED_EMPLOYEES
                }
            },
        };

        let description = non_blank(self.description.as_deref());
        let active = checkbox(self.active.as_deref());

        errors.into_result(|| ShiftInput {
            name: name.unwrap_or_default(),
            description,
            window,
            required_employees,
            active,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn employee_draft(name: &str) -> EmployeeDraft {
        EmployeeDraft {
            name: name.to_string(),
            active: Some("on".to_string()),
            ..EmployeeDraft::default()
        }
    }

    fn shift_draft(name: &str) -> ShiftDraft {
        ShiftDraft {
            name: name.to_string(),
            active: Some("on".to_string()),
            ..ShiftDraft::default()
        }
    }

    #[test]
    fn test_employee_minimal() {
        let input = employee_draft("  Nguyễn Văn An ").validate().unwrap();
        assert_eq!(input.name, "Nguyễn Văn An");
        assert_eq!(input.email, None);
        assert!(input.active);
    }

    #[test]
    fn test_employee_blank_optionals_become_none() {
        let draft = EmployeeDraft {
            email: Some("   ".to_string()),
            phone: Some(String::new()),
            position: Some(" ".to_string()),
            ..employee_draft("An")
        };
        let input = draft.validate().unwrap();
        assert!(input.email.is_none() && input.phone.is_none() && input.position.is_none());
    }

    #[test]
    fn test_employee_collects_every_error() {
        let draft = EmployeeDraft {
            name: "   ".to_string(),
            email: Some("not-an-email".to_string()),
            phone: Some("call me".to_string()),
            ..EmployeeDraft::default()
        };
        let errors = draft.validate().unwrap_err();
        let fields: Vec<&str> = errors.0.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "email", "phone"]);
        assert_eq!(errors.for_field("name"), Some("Name is required"));
        assert!(errors.to_string().starts_with("name: Name is required; email:"));
    }

    #[test]
    fn test_employee_unchecked_box_is_inactive() {
        let draft = EmployeeDraft {
            active: None,
            ..employee_draft("An")
        };
        assert!(!draft.validate().unwrap().active);
    }

    #[test]
    fn test_shift_defaults() {
        let input = shift_draft("Ca Sáng").validate().unwrap();
        assert_eq!(input.required_employees, 1);
        assert_eq!(input.window, ShiftWindow::default());
        assert!(input.active);
    }

    #[test]
    fn test_shift_full() {
        let draft = ShiftDraft {
            description: Some("Front counter".to_string()),
            start_time: Some("08:00".to_string()),
            end_time: Some("12:00:00".to_string()),
            required_employees: Some("2".to_string()),
            ..shift_draft("Ca Sáng")
        };
        let input = draft.validate().unwrap();
        assert_eq!(input.window.label(), "08:00 - 12:00");
        assert_eq!(input.required_employees, 2);
        assert_eq!(input.description.as_deref(), Some("Front counter"));
    }

    #[test]
    fn test_shift_rejects_inverted_window() {
        let draft = ShiftDraft {
            start_time: Some("18:00".to_string()),
            end_time: Some("08:00".to_string()),
            ..shift_draft("Night")
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.for_field("end_time"),
            Some("Start time must be before end time")
        );
    }

    #[test]
    fn test_shift_rejects_equal_times() {
        let draft = ShiftDraft {
            start_time: Some("08:00".to_string()),
            end_time: Some("08:00".to_string()),
            ..shift_draft("Blink")
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_shift_headcount_bounds() {
        for bad in ["0", "51", "-1", "two"] {
            let draft = ShiftDraft {
                required_employees: Some(bad.to_string()),
                ..shift_draft("Ca")
            };
            let errors = draft.validate().unwrap_err();
            assert!(errors.for_field("required_employees").is_some(), "{bad}");
        }
        for good in ["1", "50", " 7 "] {
            let draft = ShiftDraft {
                required_employees: Some(good.to_string()),
                ..shift_draft("Ca")
            };
            assert!(draft.validate().is_ok(), "{good}");
        }
    }

    #[test]
    fn test_shift_bad_time_and_blank_name() {
        let draft = ShiftDraft {
            name: String::new(),
            start_time: Some("noon".to_string()),
            ..ShiftDraft::default()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.0.len(), 2);
        assert!(errors.for_field("start_time").is_some());
    }
}
