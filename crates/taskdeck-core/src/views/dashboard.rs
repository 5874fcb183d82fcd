//! Personal dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Session, TaskCard};
use crate::derive::{Rollup, milestone_rollup, overdue_tasks, tasks_due_today};
use crate::model::{MilestoneStatus, TaskStatus, find_project};
use crate::store::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatTiles {
    pub in_progress: usize,
    pub overdue: usize,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneSummary {
    pub id: String,
    pub title: String,
    /// `None` when the milestone points at a missing project.
    pub project_title: Option<String>,
    pub project_color: Option<String>,
    pub due_date: DateTime<Utc>,
    pub progress: Rollup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub greeting: String,
    pub stats: StatTiles,
    pub overdue: Vec<TaskCard>,
    /// Size of the full overdue list, of which `overdue` is a preview.
    pub overdue_total: usize,
    pub upcoming: Vec<TaskCard>,
    /// Open tasks due on today's UTC date.
    pub due_today: usize,
    pub milestones: Vec<MilestoneSummary>,
}

#[must_use]
pub fn dashboard(state: &ViewState, session: &Session<'_>) -> DashboardView {
    let mine = session.my_tasks(state);
    let now = session.now;

    let overdue = overdue_tasks(mine.iter().copied(), now);

    let stats = StatTiles {
        in_progress: mine
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count(),
        overdue: overdue.len(),
        completed: mine.iter().filter(|t| t.is_completed()).count(),
        total: mine.len(),
    };

    let mut upcoming: Vec<_> = mine.iter().copied().filter(|t| !t.is_completed()).collect();
    upcoming.sort_by_key(|t| t.due_date);

    let milestones = session
        .milestones
        .iter()
        .filter(|m| m.status == MilestoneStatus::Active)
        .map(|m| {
            let project = find_project(session.projects, &m.project_id);
            MilestoneSummary {
                id: m.id.clone(),
                title: m.title.clone(),
                project_title: project.map(|p| p.title.clone()),
                project_color: project.map(|p| p.color.clone()),
                due_date: m.due_date,
                progress: milestone_rollup(&m.id, state.tasks()),
            }
        })
        .collect();

    DashboardView {
        greeting: format!("Welcome back, {}", session.user.first_name()),
        stats,
        overdue_total: overdue.len(),
        overdue: overdue
            .iter()
            .take(session.display.overdue_preview)
            .map(|t| session.card(t))
            .collect(),
        upcoming: upcoming
            .iter()
            .take(session.display.upcoming_limit)
            .map(|t| session.card(t))
            .collect(),
        due_today: tasks_due_today(mine.iter().copied(), now)
            .iter()
            .filter(|t| !t.is_completed())
            .count(),
        milestones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::fixture::Fixture;
    use crate::test_support::at;

    #[test]
    fn demo_dashboard_for_employee() {
        let now = at("2026-06-01T12:00:00Z");
        let fixture = Fixture::demo(now);
        let user = fixture.resolve_user(Some("u3")).unwrap();
        let state = ViewState::for_user(fixture.tasks.clone(), fixture.notifications.clone(), user);
        let session = Session::new(&fixture, user, DisplayConfig::default(), now);

        let view = dashboard(&state, &session);
        assert_eq!(view.greeting, "Welcome back, Emily");
        // t1, t2, t3, t4, t6 are Emily's.
        assert_eq!(view.stats.total, 5);
        assert_eq!(view.stats.completed, 2);
        assert_eq!(view.stats.in_progress, 1);
        assert_eq!(view.stats.overdue, 1);
        assert_eq!(view.overdue[0].id, "t1");

        let due: Vec<_> = view.upcoming.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(due, ["t1", "t2", "t4"]);
        assert_eq!(view.due_today, 0);

        // m1, m2, m4 are active; m1 has 1 of 3 done.
        assert_eq!(view.milestones.len(), 3);
        assert_eq!(view.milestones[0].progress.percent, 33);
        assert_eq!(view.milestones[0].project_title.as_deref(), Some("Brand Refresh"));
    }

    #[test]
    fn previews_respect_display_limits() {
        let now = at("2026-06-01T12:00:00Z");
        let fixture = Fixture::demo(now);
        let user = fixture.resolve_user(Some("u3")).unwrap();
        let state = ViewState::for_user(fixture.tasks.clone(), vec![], user);
        let display = DisplayConfig {
            upcoming_limit: 1,
            overdue_preview: 0,
            ..DisplayConfig::default()
        };
        let session = Session::new(&fixture, user, display, now);

        let view = dashboard(&state, &session);
        assert_eq!(view.upcoming.len(), 1);
        assert!(view.overdue.is_empty());
        assert_eq!(view.overdue_total, 1);
    }
}
