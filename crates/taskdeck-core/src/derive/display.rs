//! Display classification shared by every front end.
//!
//! The core only says *what kind* of emphasis something gets; mapping a
//! [`Tone`] to an actual color is up to the renderer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::due::{is_due_soon, is_task_overdue};
use crate::model::{NotificationKind, ProjectStatus, Task, TaskPriority, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Muted,
    Info,
    Warning,
    Caution,
    Success,
    Danger,
}

#[must_use]
pub const fn status_tone(status: TaskStatus) -> Tone {
    match status {
        TaskStatus::Todo => Tone::Neutral,
        TaskStatus::InProgress => Tone::Info,
        TaskStatus::Review => Tone::Warning,
        TaskStatus::Completed => Tone::Success,
    }
}

#[must_use]
pub const fn priority_tone(priority: TaskPriority) -> Tone {
    match priority {
        TaskPriority::Low => Tone::Muted,
        TaskPriority::Medium => Tone::Info,
        TaskPriority::High => Tone::Caution,
        TaskPriority::Urgent => Tone::Danger,
    }
}

#[must_use]
pub const fn notification_tone(kind: NotificationKind) -> Tone {
    match kind {
        NotificationKind::TaskAssigned => Tone::Info,
        NotificationKind::DeadlineApproaching => Tone::Warning,
        NotificationKind::TaskCompleted => Tone::Success,
        NotificationKind::RevisionRequested => Tone::Caution,
    }
}

#[must_use]
pub const fn project_status_tone(status: ProjectStatus) -> Tone {
    match status {
        ProjectStatus::Active => Tone::Success,
        ProjectStatus::Completed => Tone::Info,
        ProjectStatus::Planning | ProjectStatus::OnHold => Tone::Neutral,
    }
}

/// How a task card presents its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueIndicator {
    Overdue,
    DueSoon,
    Done,
    Normal,
}

impl DueIndicator {
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Overdue => Tone::Danger,
            Self::DueSoon => Tone::Warning,
            Self::Done => Tone::Success,
            Self::Normal => Tone::Muted,
        }
    }
}

/// Overdue wins over completion, completion over due-soon.
#[must_use]
pub fn due_indicator(task: &Task, now: DateTime<Utc>, horizon_days: i64) -> DueIndicator {
    if is_task_overdue(task, now) {
        DueIndicator::Overdue
    } else if task.status == TaskStatus::Completed {
        DueIndicator::Done
    } else if is_due_soon(task.due_date, now, horizon_days) {
        DueIndicator::DueSoon
    } else {
        DueIndicator::Normal
    }
}

/// First character of each whitespace-separated token, upper-cased, at most
/// two characters.
#[must_use]
pub fn user_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, task};

    #[test]
    fn initials() {
        assert_eq!(user_initials("Jordan Lee"), "JL");
        assert_eq!(user_initials("Madonna"), "M");
        assert_eq!(user_initials(""), "");
        assert_eq!(user_initials("   "), "");
        assert_eq!(user_initials("ana maria de souza"), "AM");
        assert_eq!(user_initials("  jordan   lee "), "JL");
    }

    #[test]
    fn tones_are_distinct_per_status() {
        let tones: std::collections::HashSet<Tone> =
            TaskStatus::ALL.iter().map(|s| status_tone(*s)).collect();
        assert_eq!(tones.len(), 4);
        assert_eq!(priority_tone(TaskPriority::Urgent), Tone::Danger);
    }

    #[test]
    fn due_indicator_precedence() {
        let now = at("2026-05-10T12:00:00Z");
        let mut t = task("a", TaskStatus::InProgress);

        t.due_date = at("2026-05-09T12:00:00Z");
        assert_eq!(due_indicator(&t, now, 3), DueIndicator::Overdue);

        t.status = TaskStatus::Completed;
        assert_eq!(due_indicator(&t, now, 3), DueIndicator::Done);

        t.status = TaskStatus::Todo;
        t.due_date = at("2026-05-11T12:00:00Z");
        assert_eq!(due_indicator(&t, now, 3), DueIndicator::DueSoon);

        t.due_date = at("2026-06-11T12:00:00Z");
        assert_eq!(due_indicator(&t, now, 3), DueIndicator::Normal);
    }
}
