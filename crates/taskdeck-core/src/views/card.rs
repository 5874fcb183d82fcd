use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::derive::progress::subtask_progress;
use crate::derive::{DueIndicator, Tone, due_indicator, priority_tone, status_tone, user_initials};
use crate::model::{Task, TaskPriority, TaskStatus, TaskType, User, find_user};

const MAX_CHIPS: usize = 3;
const MAX_TAGS: usize = 3;

/// Completed/total subtasks with the bar percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubtaskBar {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

/// Compact task summary used by every list and board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCard {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub status_tone: Tone,
    pub priority: TaskPriority,
    pub priority_tone: Tone,
    pub task_type: TaskType,
    pub recurring: bool,
    /// Absent when the task has no subtasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<SubtaskBar>,
    /// Initials of the first three assignees; `?` for unknown ids.
    pub assignees: Vec<String>,
    /// Assignees beyond the first three.
    pub more_assignees: usize,
    pub due_date: DateTime<Utc>,
    pub due: DueIndicator,
    pub due_tone: Tone,
    pub tags: Vec<String>,
}

#[must_use]
pub fn task_card(task: &Task, users: &[User], now: DateTime<Utc>, horizon_days: i64) -> TaskCard {
    let assignees = task
        .assigned_to
        .iter()
        .take(MAX_CHIPS)
        .map(|id| find_user(users, id).map_or_else(|| "?".to_string(), |u| user_initials(&u.name)))
        .collect();
    let due = due_indicator(task, now, horizon_days);

    TaskCard {
        id: task.id.clone(),
        title: task.title.clone(),
        status: task.status,
        status_tone: status_tone(task.status),
        priority: task.priority,
        priority_tone: priority_tone(task.priority),
        task_type: task.task_type,
        recurring: task.recurring.is_some(),
        subtasks: (!task.subtasks.is_empty()).then(|| SubtaskBar {
            completed: task.completed_subtasks(),
            total: task.subtasks.len(),
            percent: subtask_progress(task),
        }),
        assignees,
        more_assignees: task.assigned_to.len().saturating_sub(MAX_CHIPS),
        due_date: task.due_date,
        due,
        due_tone: due.tone(),
        tags: task.tags.iter().take(MAX_TAGS).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Frequency, Recurrence, Role, Subtask};
    use crate::test_support::{at, task, user};

    #[test]
    fn card_truncates_chips_and_tags() {
        let users = [
            user("a", "Ann Bell", Role::Employee),
            user("b", "Bo Chu", Role::Employee),
            user("c", "Cy Dee", Role::Employee),
        ];
        let mut t = task("t1", TaskStatus::InProgress);
        t.assigned_to = vec!["a".into(), "ghost".into(), "b".into(), "c".into()];
        t.tags = vec!["one".into(), "two".into(), "three".into(), "four".into()];

        let card = task_card(&t, &users, at("2026-01-01T00:00:00Z"), 3);
        assert_eq!(card.assignees, ["AB", "?", "BC"]);
        assert_eq!(card.more_assignees, 1);
        assert_eq!(card.tags, ["one", "two", "three"]);
        assert!(card.subtasks.is_none());
        assert!(!card.recurring);
    }

    #[test]
    fn card_reports_subtasks_recurrence_and_due() {
        let now = at("2026-03-10T12:00:00Z");
        let mut t = task("t1", TaskStatus::Todo);
        t.due_date = at("2026-03-11T12:00:00Z");
        t.recurring = Some(Recurrence {
            frequency: Frequency::Daily,
            interval: 1,
        });
        t.subtasks = vec![
            Subtask {
                id: "s1".into(),
                title: "a".into(),
                completed: true,
                assigned_to: None,
            },
            Subtask {
                id: "s2".into(),
                title: "b".into(),
                completed: false,
                assigned_to: None,
            },
        ];

        let card = task_card(&t, &[], now, 3);
        assert!(card.recurring);
        assert_eq!(
            card.subtasks,
            Some(SubtaskBar {
                completed: 1,
                total: 2,
                percent: 50
            })
        );
        assert_eq!(card.due, DueIndicator::DueSoon);
        assert_eq!(card.due_tone, Tone::Warning);
    }
}
