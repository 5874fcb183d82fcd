//! Per-user workload aggregates.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::due::is_task_overdue;
use super::progress::ratio_percent;
use crate::model::{Task, TaskStatus, User};

/// Counts and estimated hours for the tasks assigned to one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadStats {
    pub user_id: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overdue_tasks: usize,
    /// Sum of `estimated_hours`, missing estimates counted as 0.
    pub total_hours: f64,
    pub completion_rate: u32,
}

/// Aggregate the tasks assigned to `user_id`.
#[must_use]
pub fn workload_for(user_id: &str, tasks: &[Task], now: DateTime<Utc>) -> WorkloadStats {
    let mut stats = WorkloadStats {
        user_id: user_id.to_string(),
        total_tasks: 0,
        completed_tasks: 0,
        in_progress_tasks: 0,
        overdue_tasks: 0,
        total_hours: 0.0,
        completion_rate: 0,
    };

    for task in tasks.iter().filter(|t| t.is_assigned_to(user_id)) {
        stats.total_tasks += 1;
        match task.status {
            TaskStatus::Completed => stats.completed_tasks += 1,
            TaskStatus::InProgress => stats.in_progress_tasks += 1,
            TaskStatus::Todo | TaskStatus::Review => {}
        }
        if is_task_overdue(task, now) {
            stats.overdue_tasks += 1;
        }
        stats.total_hours += task.estimated_hours.unwrap_or(0.0);
    }

    stats.completion_rate = ratio_percent(stats.completed_tasks, stats.total_tasks);
    stats
}

/// Users shown on the team and analytics screens, in fixture order.
#[must_use]
pub fn team_members(users: &[User]) -> Vec<&User> {
    users.iter().filter(|u| u.role.is_team_member()).collect()
}
