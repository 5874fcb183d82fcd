//! Task detail overlay.
//!
//! The overlay is the only place a task can be edited. Whether status and
//! subtask controls are offered comes from [`Capabilities::can_edit_task`];
//! internal notes are withheld from roles without `see_internal_notes`.
//!
//! [`Capabilities::can_edit_task`]: crate::access::Capabilities::can_edit_task

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Session;
use crate::derive::progress::subtask_progress;
use crate::derive::{DueIndicator, due_indicator, user_initials};
use crate::model::{
    Task, TaskPriority, TaskStatus, TaskType, User, find_milestone, find_project, find_user,
};
use crate::store::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRef {
    pub id: String,
    pub name: String,
    pub initials: String,
}

impl PersonRef {
    fn of(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            initials: user_initials(&user.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtaskRow {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// Logged against estimated hours; a missing side counts as 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hours {
    pub actual: f64,
    pub estimated: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub task_type: TaskType,
    pub due_date: DateTime<Utc>,
    pub due: DueIndicator,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `None` when the creator id is dangling.
    pub creator: Option<PersonRef>,
    /// Known assignees only; dangling ids are skipped.
    pub assignees: Vec<PersonRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<Hours>,
    pub subtasks: Vec<SubtaskRow>,
    pub subtask_progress: u32,
    pub tags: Vec<String>,
    pub attachments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    pub can_edit: bool,
    /// Statuses the overlay offers; empty when `can_edit` is false.
    pub status_options: Vec<TaskStatus>,
}

#[must_use]
pub fn task_detail(task: &Task, session: &Session<'_>) -> TaskDetail {
    let caps = &session.caps;
    let can_edit = caps.can_edit_task(&session.user.id, task);
    let milestone = find_milestone(session.milestones, &task.milestone_id);
    let project = milestone.and_then(|m| find_project(session.projects, &m.project_id));

    let hours = (task.estimated_hours.is_some() || task.actual_hours.is_some()).then(|| Hours {
        actual: task.actual_hours.unwrap_or(0.0),
        estimated: task.estimated_hours.unwrap_or(0.0),
    });

    TaskDetail {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status,
        priority: task.priority,
        task_type: task.task_type,
        due_date: task.due_date,
        due: due_indicator(task, session.now, session.display.due_soon_days),
        created_at: task.created_at,
        updated_at: task.updated_at,
        creator: find_user(session.users, &task.created_by).map(PersonRef::of),
        assignees: task
            .assigned_to
            .iter()
            .filter_map(|id| find_user(session.users, id))
            .map(PersonRef::of)
            .collect(),
        hours,
        subtasks: task
            .subtasks
            .iter()
            .map(|s| SubtaskRow {
                id: s.id.clone(),
                title: s.title.clone(),
                completed: s.completed,
                assignee: s
                    .assigned_to
                    .as_deref()
                    .and_then(|id| find_user(session.users, id))
                    .map(|u| u.name.clone()),
            })
            .collect(),
        subtask_progress: subtask_progress(task),
        tags: task.tags.clone(),
        attachments: task.attachments.clone(),
        milestone: milestone.map(|m| m.title.clone()),
        project: project.map(|p| p.title.clone()),
        recurring: task.recurring.map(|r| r.to_string()),
        internal_notes: task
            .internal_notes
            .clone()
            .filter(|_| caps.see_internal_notes),
        can_edit,
        status_options: if can_edit {
            TaskStatus::ALL.to_vec()
        } else {
            Vec::new()
        },
    }
}

/// Detail for the store's selected task, if any.
#[must_use]
pub fn selected_detail(state: &ViewState, session: &Session<'_>) -> Option<TaskDetail> {
    state.selected_task().map(|t| task_detail(t, session))
}
