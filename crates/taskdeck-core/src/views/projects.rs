//! Read-only project viewer, the landing screen for the viewer role.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Session, TaskCard};
use crate::derive::display::project_status_tone;
use crate::derive::progress::milestone_tasks;
use crate::derive::{Rollup, Tone, milestone_rollup, project_rollup};
use crate::model::{MilestoneStatus, ProjectStatus};
use crate::store::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewerCounts {
    pub projects: usize,
    pub milestones: usize,
    pub completed_tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneBlock {
    pub id: String,
    pub title: String,
    pub status: MilestoneStatus,
    pub due_date: DateTime<Utc>,
    pub progress: Rollup,
    pub tasks: Vec<TaskCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectBlock {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub status: ProjectStatus,
    pub status_tone: Tone,
    pub color: String,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub progress: Rollup,
    pub milestones: Vec<MilestoneBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectsView {
    pub counts: ViewerCounts,
    pub projects: Vec<ProjectBlock>,
}

#[must_use]
pub fn project_viewer(state: &ViewState, session: &Session<'_>) -> ProjectsView {
    let tasks = state.tasks();

    let projects = session
        .projects
        .iter()
        .map(|p| {
            let milestones = session
                .milestones
                .iter()
                .filter(|m| m.project_id == p.id)
                .map(|m| MilestoneBlock {
                    id: m.id.clone(),
                    title: m.title.clone(),
                    status: m.status,
                    due_date: m.due_date,
                    progress: milestone_rollup(&m.id, tasks),
                    tasks: milestone_tasks(&m.id, tasks)
                        .into_iter()
                        .map(|t| session.card(t))
                        .collect(),
                })
                .collect();

            ProjectBlock {
                id: p.id.clone(),
                title: p.title.clone(),
                description: p.description.clone(),
                client: p.client.clone(),
                status: p.status,
                status_tone: project_status_tone(p.status),
                color: p.color.clone(),
                start_date: p.start_date,
                end_date: p.end_date,
                progress: project_rollup(&p.id, tasks, session.milestones),
                milestones,
            }
        })
        .collect();

    ProjectsView {
        counts: ViewerCounts {
            projects: session.projects.len(),
            milestones: session.milestones.len(),
            completed_tasks: tasks.iter().filter(|t| t.is_completed()).count(),
        },
        projects,
    }
}
