//! Whole-team analytics: breakdowns, member completion, time efficiency.

use serde::Serialize;

use super::progress::{calculate_progress, hours_percent, ratio_percent};
use super::workload::team_members;
use crate::model::{Task, TaskPriority, TaskType, User};

/// Count and share of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown<K> {
    pub key: K,
    pub count: usize,
    /// Percent of all tasks; 0 when there are no tasks.
    pub percent: u32,
}

/// Completion stats for one team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberStats {
    pub user_id: String,
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub rate: u32,
}

/// Estimated vs. actual hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSummary {
    pub estimated_hours: f64,
    pub actual_hours: f64,
    /// `round(100 × actual / estimated)`; 0 when nothing is estimated.
    pub efficiency: u32,
}

/// Everything the analytics screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: u32,
    pub by_type: Vec<Breakdown<TaskType>>,
    pub by_priority: Vec<Breakdown<TaskPriority>>,
    pub members: Vec<MemberStats>,
    pub time: TimeSummary,
}

/// Group tasks by `key_of`, keeping `order` and dropping empty categories.
fn breakdown<K: Copy + PartialEq>(
    tasks: &[Task],
    order: &[K],
    key_of: impl Fn(&Task) -> K,
) -> Vec<Breakdown<K>> {
    let total = tasks.len();
    order
        .iter()
        .filter_map(|&key| {
            let count = tasks.iter().filter(|t| key_of(t) == key).count();
            (count > 0).then(|| Breakdown {
                key,
                count,
                percent: ratio_percent(count, total),
            })
        })
        .collect()
}

/// Task counts per type, in canonical type order.
#[must_use]
pub fn by_type(tasks: &[Task]) -> Vec<Breakdown<TaskType>> {
    breakdown(tasks, &TaskType::ALL, |t| t.task_type)
}

/// Task counts per priority, lowest first.
#[must_use]
pub fn by_priority(tasks: &[Task]) -> Vec<Breakdown<TaskPriority>> {
    breakdown(tasks, &TaskPriority::ALL, |t| t.priority)
}

/// Sum of estimated and actual hours, missing values counted as 0.
#[must_use]
pub fn time_summary(tasks: &[Task]) -> TimeSummary {
    let estimated_hours: f64 = tasks.iter().filter_map(|t| t.estimated_hours).sum();
    let actual_hours: f64 = tasks.iter().filter_map(|t| t.actual_hours).sum();
    TimeSummary {
        estimated_hours,
        actual_hours,
        efficiency: hours_percent(actual_hours, estimated_hours),
    }
}

/// Completion per team member.
#[must_use]
pub fn member_stats(tasks: &[Task], users: &[User]) -> Vec<MemberStats> {
    team_members(users)
        .into_iter()
        .map(|member| {
            let (completed, total) = tasks
                .iter()
                .filter(|t| t.is_assigned_to(&member.id))
                .fold((0, 0), |(done, total), t| {
                    (done + usize::from(t.is_completed()), total + 1)
                });
            MemberStats {
                user_id: member.id.clone(),
                name: member.name.clone(),
                total,
                completed,
                rate: ratio_percent(completed, total),
            }
        })
        .collect()
}

/// Compute the full analytics summary.
#[must_use]
pub fn summarize(tasks: &[Task], users: &[User]) -> AnalyticsSummary {
    AnalyticsSummary {
        total_tasks: tasks.len(),
        completed_tasks: tasks.iter().filter(|t| t.is_completed()).count(),
        completion_rate: calculate_progress(tasks),
        by_type: by_type(tasks),
        by_priority: by_priority(tasks),
        members: member_stats(tasks, users),
        time: time_summary(tasks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, TaskStatus};
    use crate::test_support::{task, user};

    #[test]
    fn empty_task_list_yields_zeroes() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.completion_rate, 0);
        assert!(summary.by_type.is_empty());
        assert!(summary.by_priority.is_empty());
        assert_eq!(summary.time.efficiency, 0);
    }

    #[test]
    fn breakdowns_count_and_share() {
        let mut a = task("a", TaskStatus::Todo);
        a.task_type = TaskType::Design;
        a.priority = TaskPriority::High;
        let mut b = task("b", TaskStatus::Todo);
        b.task_type = TaskType::Design;
        b.priority = TaskPriority::Low;
        let mut c = task("c", TaskStatus::Completed);
        c.task_type = TaskType::Deployment;
        c.priority = TaskPriority::High;
        let tasks = [a, b, c];

        let types = by_type(&tasks);
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].key, TaskType::Design);
        assert_eq!((types[0].count, types[0].percent), (2, 67));
        assert_eq!((types[1].count, types[1].percent), (1, 33));

        let priorities = by_priority(&tasks);
        assert_eq!(priorities[0].key, TaskPriority::Low);
        assert_eq!(priorities[1].key, TaskPriority::High);
        assert_eq!(priorities[1].count, 2);
    }

    #[test]
    fn efficiency_uses_hour_sums() {
        let mut a = task("a", TaskStatus::Completed);
        a.estimated_hours = Some(10.0);
        a.actual_hours = Some(12.0);
        let mut b = task("b", TaskStatus::Todo);
        b.estimated_hours = Some(6.0);
        let c = task("c", TaskStatus::Todo);
        let time = time_summary(&[a, b, c]);
        assert!((time.estimated_hours - 16.0).abs() < f64::EPSILON);
        assert!((time.actual_hours - 12.0).abs() < f64::EPSILON);
        assert_eq!(time.efficiency, 75);
    }

    #[test]
    fn member_stats_cover_team_only() {
        let users = [
            user("adm", "Ada Admin", Role::Admin),
            user("e1", "Eve Lin", Role::Employee),
        ];
        let mut t = task("a", TaskStatus::Completed);
        t.assigned_to = vec!["e1".into(), "adm".into()];
        let stats = member_stats(&[t], &users);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].user_id, "e1");
        assert_eq!(stats[0].rate, 100);
    }
}
