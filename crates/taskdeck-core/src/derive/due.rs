//! Due-date classification and status filters.

use chrono::{DateTime, Duration, Utc};

use crate::model::{Task, TaskStatus};

/// Forward-looking window for [`is_due_soon`] when config does not override it.
pub const DEFAULT_DUE_SOON_DAYS: i64 = 3;

/// `due` is strictly before `now`.
#[must_use]
pub fn is_overdue(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    due < now
}

/// `due` is strictly after `now` and strictly before `now + horizon_days`.
///
/// A non-positive horizon never matches.
#[must_use]
pub fn is_due_soon(due: DateTime<Utc>, now: DateTime<Utc>, horizon_days: i64) -> bool {
    let Some(limit) = now.checked_add_signed(Duration::days(horizon_days)) else {
        return due > now;
    };
    due > now && due < limit
}

/// Past due and not completed. A completed task is never overdue.
#[must_use]
pub fn is_task_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    is_overdue(task.due_date, now) && task.status != TaskStatus::Completed
}

/// Tasks that are past due and not completed, in input order.
pub fn overdue_tasks<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    now: DateTime<Utc>,
) -> Vec<&'a Task> {
    tasks
        .into_iter()
        .filter(|t| is_task_overdue(t, now))
        .collect()
}

/// Exact-match status filter, order preserved.
pub fn tasks_by_status<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    status: TaskStatus,
) -> Vec<&'a Task> {
    tasks.into_iter().filter(|t| t.status == status).collect()
}

/// Tasks due on the same UTC calendar day as `now`, regardless of status.
pub fn tasks_due_today<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    now: DateTime<Utc>,
) -> Vec<&'a Task> {
    let today = now.date_naive();
    tasks
        .into_iter()
        .filter(|t| t.due_date.date_naive() == today)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, task};

    #[test]
    fn overdue_is_strict() {
        let now = at("2026-05-10T12:00:00Z");
        assert!(is_overdue(at("2026-05-10T11:59:59Z"), now));
        assert!(!is_overdue(now, now));
        assert!(!is_overdue(at("2026-05-11T00:00:00Z"), now));
    }

    #[test]
    fn due_soon_window_is_open_on_both_ends() {
        let now = at("2026-05-10T12:00:00Z");
        assert!(!is_due_soon(now, now, 3));
        assert!(is_due_soon(at("2026-05-10T12:00:01Z"), now, 3));
        assert!(is_due_soon(at("2026-05-13T11:59:59Z"), now, 3));
        assert!(!is_due_soon(at("2026-05-13T12:00:00Z"), now, 3));
        assert!(!is_due_soon(at("2026-05-09T12:00:00Z"), now, 3));
    }

    #[test]
    fn due_soon_with_zero_horizon_never_matches() {
        let now = at("2026-05-10T12:00:00Z");
        assert!(!is_due_soon(at("2026-05-10T12:30:00Z"), now, 0));
    }

    #[test]
    fn completed_tasks_are_never_overdue() {
        let now = at("2026-05-10T12:00:00Z");
        let mut late = task("t1", TaskStatus::InProgress);
        late.due_date = at("2026-05-01T00:00:00Z");
        let mut done = late.clone();
        done.id = "t2".into();
        done.status = TaskStatus::Completed;

        let tasks = [late, done];
        let overdue = overdue_tasks(&tasks, now);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "t1");
    }

    #[test]
    fn status_filter_preserves_order() {
        let tasks = [
            task("a", TaskStatus::Review),
            task("b", TaskStatus::Todo),
            task("c", TaskStatus::Review),
        ];
        let ids: Vec<&str> = tasks_by_status(&tasks, TaskStatus::Review)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn due_today_matches_calendar_day() {
        let now = at("2026-05-10T08:00:00Z");
        let mut morning = task("a", TaskStatus::Todo);
        morning.due_date = at("2026-05-10T00:30:00Z");
        let mut evening = task("b", TaskStatus::Completed);
        evening.due_date = at("2026-05-10T23:00:00Z");
        let mut tomorrow = task("c", TaskStatus::Todo);
        tomorrow.due_date = at("2026-05-11T00:00:00Z");

        let tasks = [morning, evening, tomorrow];
        assert_eq!(tasks_due_today(&tasks, now).len(), 2);
    }
}
