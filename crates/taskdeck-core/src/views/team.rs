//! Team overview: workload per member plus what needs attention.

use serde::Serialize;

use super::{Session, TaskCard};
use crate::derive::display::project_status_tone;
use crate::derive::progress::project_tasks;
use crate::derive::{
    Rollup, Tone, WorkloadStats, overdue_tasks, project_rollup, tasks_by_status, team_members,
    user_initials, workload_for,
};
use crate::model::{ProjectStatus, Role, TaskStatus};
use crate::store::ViewState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberWorkload {
    pub name: String,
    pub initials: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(flatten)]
    pub stats: WorkloadStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub color: String,
    pub status: ProjectStatus,
    pub status_tone: Tone,
    pub task_count: usize,
    pub progress: Rollup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamView {
    pub members: Vec<MemberWorkload>,
    /// Every overdue task across the team.
    pub overdue_total: usize,
    /// The first few overdue tasks.
    pub attention: Vec<TaskCard>,
    pub in_review: usize,
    pub active_projects: Vec<ProjectSummary>,
}

#[must_use]
pub fn team_overview(state: &ViewState, session: &Session<'_>) -> TeamView {
    let tasks = state.tasks();
    let now = session.now;

    let members = team_members(session.users)
        .into_iter()
        .map(|u| MemberWorkload {
            name: u.name.clone(),
            initials: user_initials(&u.name),
            role: u.role,
            department: u.department.clone(),
            stats: workload_for(&u.id, tasks, now),
        })
        .collect();

    let overdue = overdue_tasks(tasks, now);

    let active_projects = session
        .projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Active)
        .map(|p| ProjectSummary {
            id: p.id.clone(),
            title: p.title.clone(),
            client: p.client.clone(),
            color: p.color.clone(),
            status: p.status,
            status_tone: project_status_tone(p.status),
            task_count: project_tasks(&p.id, tasks, session.milestones).len(),
            progress: project_rollup(&p.id, tasks, session.milestones),
        })
        .collect();

    TeamView {
        members,
        overdue_total: overdue.len(),
        attention: overdue
            .iter()
            .take(session.display.attention_limit)
            .map(|t| session.card(t))
            .collect(),
        in_review: tasks_by_status(tasks, TaskStatus::Review).len(),
        active_projects,
    }
}
