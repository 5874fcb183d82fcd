//! Entity shapes and enumerations.
//!
//! Entities are plain data. Every change produces a new value through the
//! [`crate::store::ViewState`] operations; nothing here mutates in place.

pub mod notification;
pub mod project;
pub mod task;
pub mod user;

pub use notification::{Notification, NotificationKind};
pub use project::{
    Milestone, MilestoneStatus, Project, ProjectStatus, find_milestone, find_project,
};
pub use task::{Frequency, Recurrence, Subtask, Task, TaskPriority, TaskStatus, TaskType};
pub use user::{Role, User, find_user};

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected}: '{got}'")]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl ParseEnumError {
    pub(crate) fn new(expected: &'static str, got: &str) -> Self {
        Self {
            expected,
            got: got.to_string(),
        }
    }
}

/// Lower-case, trim, and fold `_`/space to `-` so `In Progress`,
/// `in_progress` and `in-progress` all parse the same.
pub(crate) fn normalize(input: &str) -> String {
    input
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{find_milestone, find_project, find_user, normalize};
    use crate::model::Role;
    use crate::test_support::{milestone, user};

    #[test]
    fn normalize_folds_separators() {
        assert_eq!(normalize(" In Progress "), "in-progress");
        assert_eq!(normalize("video_editing"), "video-editing");
        assert_eq!(normalize("on-hold"), "on-hold");
    }

    #[test]
    fn lookups_resolve_or_yield_none() {
        let users = vec![user("u1", "Ada Admin", Role::Admin)];
        assert_eq!(find_user(&users, "u1").map(|u| u.name.as_str()), Some("Ada Admin"));
        assert!(find_user(&users, "ghost").is_none());

        let milestones = vec![milestone("m1", "p1")];
        assert_eq!(find_milestone(&milestones, "m1").map(|m| m.project_id.as_str()), Some("p1"));
        assert!(find_milestone(&milestones, "m9").is_none());
        assert!(find_project(&[], "p1").is_none());
    }
}
