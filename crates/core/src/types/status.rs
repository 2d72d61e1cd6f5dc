//! Status enums for roster entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a single assignment.
///
/// `Deleted` is the soft-delete marker: the row stays in the store but every
/// lookup treats it as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "assignment_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Planned but not yet worked.
    #[default]
    Assigned,
    /// Shift was worked.
    Completed,
    /// Employee did not show up.
    Absent,
    /// Soft-deleted.
    Deleted,
}

impl AssignmentStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 4] = [Self::Assigned, Self::Completed, Self::Absent, Self::Deleted];

    /// Whether lookups should still see an assignment with this status.
    #[must_use]
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Deleted)
    }

    /// Stable lowercase name, as stored and serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Completed => "completed",
            Self::Absent => "absent",
            Self::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(Self::Assigned),
            "completed" => Ok(Self::Completed),
            "absent" => Ok(Self::Absent),
            "deleted" => Ok(Self::Deleted),
            _ => Err(format!("invalid assignment status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_only_deleted_is_not_live() {
        for status in AssignmentStatus::ALL {
            assert_eq!(status.is_live(), status != AssignmentStatus::Deleted);
        }
    }

    #[test]
    fn test_display_matches_from_str() {
        for status in AssignmentStatus::ALL {
            assert_eq!(status.to_string().parse::<AssignmentStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<AssignmentStatus>().is_err());
    }

    #[test]
    fn test_default_is_assigned() {
        assert_eq!(AssignmentStatus::default(), AssignmentStatus::Assigned);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&AssignmentStatus::Absent).unwrap(),
            "\"absent\""
        );
    }
}
