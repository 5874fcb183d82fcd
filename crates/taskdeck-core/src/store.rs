//! View state store.
//!
//! [`ViewState`] is a value: every operation borrows the current snapshot and
//! returns the next one, leaving the old snapshot intact. Callers replace
//! their handle (`state = state.change_status(..)`), so no reader can observe
//! a half-applied change.
//!
//! Operations that reference an unknown id return an unchanged copy. The UI
//! only ever offers ids it has rendered, so there is nothing useful to report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace};

use crate::access::{AccessError, Capabilities};
use crate::model::{Notification, Task, TaskStatus, User};
use crate::nav::{ViewId, default_view};

/// A user interaction, emitted by a screen and applied by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ChangeStatus { task_id: String, status: TaskStatus },
    ToggleSubtask { task_id: String, subtask_id: String },
    MarkNotificationRead { id: String },
    MarkAllRead,
    SelectTask { task_id: Option<String> },
    SetActiveView { view: ViewId },
}

/// Snapshot of everything the screens share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    tasks: Vec<Task>,
    notifications: Vec<Notification>,
    selected_task: Option<String>,
    active_view: ViewId,
}

/// `updated_at` never moves backwards, even if the caller's clock does.
fn touched(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    previous.max(now)
}

impl ViewState {
    #[must_use]
    pub const fn new(
        tasks: Vec<Task>,
        notifications: Vec<Notification>,
        active_view: ViewId,
    ) -> Self {
        Self {
            tasks,
            notifications,
            selected_task: None,
            active_view,
        }
    }

    /// Initial snapshot for a session: the user's own notifications and the
    /// role's default screen.
    #[must_use]
    pub fn for_user(tasks: Vec<Task>, notifications: Vec<Notification>, user: &User) -> Self {
        let notifications = notifications
            .into_iter()
            .filter(|n| n.user_id == user.id)
            .collect();
        Self::new(tasks, notifications, default_view(user.role))
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    #[must_use]
    pub fn selected_task_id(&self) -> Option<&str> {
        self.selected_task.as_deref()
    }

    /// The detail-overlay target, resolved against the current task list so
    /// it always reflects the latest status and subtasks.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_task.as_deref().and_then(|id| self.task(id))
    }

    #[must_use]
    pub const fn active_view(&self) -> ViewId {
        self.active_view
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Set a task's status and stamp `updated_at`.
    #[must_use]
    pub fn change_status(&self, task_id: &str, status: TaskStatus, now: DateTime<Utc>) -> Self {
        if self.task(task_id).is_none() {
            trace!(task_id, "change_status: unknown task");
            return self.clone();
        }

        debug!(task_id, %status, "change_status");
        let tasks = self
            .tasks
            .iter()
            .map(|t| {
                if t.id == task_id {
                    Task {
                        status,
                        updated_at: touched(t.updated_at, now),
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect();

        Self {
            tasks,
            ..self.clone_without_tasks()
        }
    }

    /// Flip one subtask's `completed` flag and stamp `updated_at`.
    #[must_use]
    pub fn toggle_subtask(&self, task_id: &str, subtask_id: &str, now: DateTime<Utc>) -> Self {
        let found = self
            .task(task_id)
            .is_some_and(|t| t.subtasks.iter().any(|s| s.id == subtask_id));
        if !found {
            trace!(task_id, subtask_id, "toggle_subtask: unknown task or subtask");
            return self.clone();
        }

        debug!(task_id, subtask_id, "toggle_subtask");
        let tasks = self
            .tasks
            .iter()
            .map(|t| {
                if t.id != task_id {
                    return t.clone();
                }
                let subtasks = t
                    .subtasks
                    .iter()
                    .map(|s| {
                        let mut next = s.clone();
                        if s.id == subtask_id {
                            next.completed = !s.completed;
                        }
                        next
                    })
                    .collect();
                Task {
                    subtasks,
                    updated_at: touched(t.updated_at, now),
                    ..t.clone()
                }
            })
            .collect();

        Self {
            tasks,
            ..self.clone_without_tasks()
        }
    }

    /// Mark one notification read. Idempotent.
    #[must_use]
    pub fn mark_notification_read(&self, id: &str) -> Self {
        if !self.notifications.iter().any(|n| n.id == id) {
            trace!(id, "mark_notification_read: unknown notification");
            return self.clone();
        }

        debug!(id, "mark_notification_read");
        let notifications = self
            .notifications
            .iter()
            .map(|n| Notification {
                read: n.read || n.id == id,
                ..n.clone()
            })
            .collect();

        Self {
            notifications,
            ..self.clone()
        }
    }

    /// Mark every notification read.
    #[must_use]
    pub fn mark_all_read(&self) -> Self {
        debug!(unread = self.unread_count(), "mark_all_read");
        let notifications = self
            .notifications
            .iter()
            .map(|n| Notification {
                read: true,
                ..n.clone()
            })
            .collect();

        Self {
            notifications,
            ..self.clone()
        }
    }

    /// Open the detail overlay on `task_id`, or close it with `None`.
    ///
    /// An unknown id leaves the current selection in place.
    #[must_use]
    pub fn select_task(&self, task_id: Option<&str>) -> Self {
        match task_id {
            Some(id) if self.task(id).is_none() => {
                trace!(task_id = id, "select_task: unknown task");
                self.clone()
            }
            _ => Self {
                selected_task: task_id.map(str::to_string),
                ..self.clone()
            },
        }
    }

    /// Switch screens. No role check happens here; see
    /// [`ViewState::try_set_active_view`] for the enforcing variant.
    #[must_use]
    pub fn set_active_view(&self, view: ViewId) -> Self {
        debug!(%view, "set_active_view");
        Self {
            active_view: view,
            ..self.clone()
        }
    }

    /// Switch screens only if `caps` lists the view.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the role may not open `view`.
    pub fn try_set_active_view(
        &self,
        view: ViewId,
        caps: &Capabilities,
    ) -> Result<Self, AccessError> {
        if caps.can_view(view) {
            Ok(self.set_active_view(view))
        } else {
            Err(AccessError {
                view,
                role: caps.role,
            })
        }
    }

    /// Apply an intent without role checks.
    #[must_use]
    pub fn apply(&self, intent: &Intent, now: DateTime<Utc>) -> Self {
        match intent {
            Intent::ChangeStatus { task_id, status } => self.change_status(task_id, *status, now),
            Intent::ToggleSubtask {
                task_id,
                subtask_id,
            } => self.toggle_subtask(task_id, subtask_id, now),
            Intent::MarkNotificationRead { id } => self.mark_notification_read(id),
            Intent::MarkAllRead => self.mark_all_read(),
            Intent::SelectTask { task_id } => self.select_task(task_id.as_deref()),
            Intent::SetActiveView { view } => self.set_active_view(*view),
        }
    }

    /// Apply an intent, routing view switches through
    /// [`ViewState::try_set_active_view`].
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] for a view switch the role may not make.
    pub fn apply_enforced(
        &self,
        intent: &Intent,
        now: DateTime<Utc>,
        caps: &Capabilities,
    ) -> Result<Self, AccessError> {
        match intent {
            Intent::SetActiveView { view } => self.try_set_active_view(*view, caps),
            other => Ok(self.apply(other, now)),
        }
    }

    fn clone_without_tasks(&self) -> Self {
        Self {
            tasks: Vec::new(),
            notifications: self.notifications.clone(),
            selected_task: self.selected_task.clone(),
            active_view: self.active_view,
        }
    }
}
