//! Completion percentages and project/milestone rollups.

use serde::Serialize;

use crate::model::{Milestone, Task, TaskStatus};

/// `round_half_up(100 × part / total)`, or 0 when `total` is 0.
///
/// Integer arithmetic only, so there is no float rounding drift at the `.5`
/// boundary.
#[must_use]
pub fn ratio_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let part = part as u128;
    let total = total as u128;
    let rounded = (200 * part + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// `round_half_up(100 × actual / estimated)` for hour sums, or 0 when the
/// denominator is not positive.
#[must_use]
pub fn hours_percent(actual: f64, estimated: f64) -> u32 {
    if estimated <= 0.0 || !estimated.is_finite() || !actual.is_finite() {
        return 0;
    }
    let value = (100.0 * actual / estimated + 0.5).floor();
    if value <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = value.min(f64::from(u32::MAX)) as u32;
    value
}

/// Share of completed tasks as a whole percent. Empty input yields 0.
pub fn calculate_progress<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> u32 {
    let (completed, total) = tasks.into_iter().fold((0, 0), |(done, total), t| {
        (done + usize::from(t.status == TaskStatus::Completed), total + 1)
    });
    ratio_percent(completed, total)
}

/// Share of completed subtasks. A task without subtasks yields 0.
#[must_use]
pub fn subtask_progress(task: &Task) -> u32 {
    ratio_percent(task.completed_subtasks(), task.subtasks.len())
}

/// Completed-over-total counts for a group of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rollup {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

impl Rollup {
    fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let (completed, total) = tasks.into_iter().fold((0, 0), |(done, total), t| {
            (done + usize::from(t.is_completed()), total + 1)
        });
        Self {
            completed,
            total,
            percent: ratio_percent(completed, total),
        }
    }
}

/// Tasks whose milestone belongs to `project_id`, in input order.
///
/// Tasks with a dangling `milestone_id` belong to no project.
pub fn project_tasks<'a>(
    project_id: &str,
    tasks: &'a [Task],
    milestones: &[Milestone],
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| {
            milestones
                .iter()
                .find(|m| m.id == t.milestone_id)
                .is_some_and(|m| m.project_id == project_id)
        })
        .collect()
}

/// Tasks attached directly to `milestone_id`, in input order.
pub fn milestone_tasks<'a>(milestone_id: &str, tasks: &'a [Task]) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.milestone_id == milestone_id)
        .collect()
}

/// Progress of a project computed from its milestones' tasks.
#[must_use]
pub fn project_rollup(project_id: &str, tasks: &[Task], milestones: &[Milestone]) -> Rollup {
    Rollup::from_tasks(project_tasks(project_id, tasks, milestones))
}

/// Progress of a milestone computed from its tasks.
///
/// This is the value screens display; the fixture's stored
/// [`Milestone::progress`] is not consulted.
#[must_use]
pub fn milestone_rollup(milestone_id: &str, tasks: &[Task]) -> Rollup {
    Rollup::from_tasks(milestone_tasks(milestone_id, tasks))
}
