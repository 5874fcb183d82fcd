//! Per-screen projections.
//!
//! Each function takes a [`ViewState`] snapshot plus a [`Session`] and
//! returns a serializable description of one screen. Front ends draw these
//! and never re-derive anything themselves:
//!
//! - [`dashboard::dashboard`] – greeting, stat tiles, overdue and upcoming work
//! - [`tasks::task_board`] – filtered four-column board
//! - [`team::team_overview`] – workload per member, attention list
//! - [`analytics::analytics`] – whole-team breakdowns
//! - [`projects::project_viewer`] – projects, milestones and their tasks
//! - [`notifications::notification_list`] – inbox with unread summary
//! - [`detail::task_detail`] – the task overlay
//! - [`card::task_card`] – the compact card every list reuses

pub mod analytics;
pub mod card;
pub mod dashboard;
pub mod detail;
pub mod notifications;
pub mod projects;
pub mod tasks;
pub mod team;

pub use analytics::analytics;
pub use card::{TaskCard, task_card};
pub use dashboard::{DashboardView, dashboard};
pub use detail::{TaskDetail, selected_detail, task_detail};
pub use notifications::{NotificationsView, notification_list, summary_line};
pub use projects::{ProjectsView, project_viewer};
pub use tasks::{TaskFilter, TasksView, task_board};
pub use team::{TeamView, team_overview};

use chrono::{DateTime, Utc};

use crate::access::{Capabilities, role_permissions};
use crate::config::DisplayConfig;
use crate::fixture::Fixture;
use crate::model::{Milestone, Project, Task, User};
use crate::store::ViewState;

/// Who is looking, at what reference data, and when.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    pub user: &'a User,
    pub caps: Capabilities,
    pub users: &'a [User],
    pub projects: &'a [Project],
    pub milestones: &'a [Milestone],
    pub display: DisplayConfig,
    pub now: DateTime<Utc>,
}

impl<'a> Session<'a> {
    #[must_use]
    pub fn new(
        fixture: &'a Fixture,
        user: &'a User,
        display: DisplayConfig,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user,
            caps: role_permissions(user.role),
            users: &fixture.users,
            projects: &fixture.projects,
            milestones: &fixture.milestones,
            display,
            now,
        }
    }

    /// Tasks assigned to the session user, in store order.
    #[must_use]
    pub fn my_tasks<'s>(&self, state: &'s ViewState) -> Vec<&'s Task> {
        state
            .tasks()
            .iter()
            .filter(|t| t.is_assigned_to(&self.user.id))
            .collect()
    }

    pub(crate) fn card(&self, task: &Task) -> TaskCard {
        task_card(task, self.users, self.now, self.display.due_soon_days)
    }
}
