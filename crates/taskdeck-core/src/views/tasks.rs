//! The "My Tasks" board.
//!
//! Filter state belongs to the screen, not the store: switching away and
//! back is allowed to reset it.

use serde::{Deserialize, Serialize};

use super::{Session, TaskCard};
use crate::derive::tasks_by_status;
use crate::model::{Task, TaskPriority, TaskStatus, TaskType};
use crate::store::ViewState;

/// Conjunctive filter; `None` on a field means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub task_type: Option<TaskType>,
}

impl TaskFilter {
    /// Returns true if no filter criteria are active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.task_type.is_none()
    }

    /// Returns true if the task satisfies all active criteria.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|s| task.status == s)
            && self.priority.is_none_or(|p| task.priority == p)
            && self.task_type.is_none_or(|t| task.task_type == t)
    }

    /// Keep matching tasks, order preserved.
    pub fn apply<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a Task> {
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub label: &'static str,
    pub tasks: Vec<TaskCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasksView {
    pub filter: TaskFilter,
    /// All of the user's tasks, before filtering.
    pub total: usize,
    pub shown: usize,
    /// One column per status, always all four, in board order.
    pub columns: Vec<BoardColumn>,
    /// Types present among the user's tasks, in canonical order.
    pub available_types: Vec<TaskType>,
}

/// Distinct task types present in `tasks`, in canonical order.
pub fn available_types<'a>(tasks: impl IntoIterator<Item = &'a Task> + Clone) -> Vec<TaskType> {
    TaskType::ALL
        .into_iter()
        .filter(|ty| tasks.clone().into_iter().any(|t| t.task_type == *ty))
        .collect()
}

#[must_use]
pub fn task_board(state: &ViewState, session: &Session<'_>, filter: TaskFilter) -> TasksView {
    let mine = session.my_tasks(state);
    let shown = filter.apply(mine.iter().copied());

    let columns = TaskStatus::ALL
        .into_iter()
        .map(|status| BoardColumn {
            status,
            label: status.label(),
            tasks: tasks_by_status(shown.iter().copied(), status)
                .into_iter()
                .map(|t| session.card(t))
                .collect(),
        })
        .collect();

    TasksView {
        filter,
        total: mine.len(),
        shown: shown.len(),
        columns,
        available_types: available_types(mine.iter().copied()),
    }
}
