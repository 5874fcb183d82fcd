//! taskdeck-core library.
//!
//! Everything a taskdeck front end needs except the drawing: entity types,
//! pure derivations, the immutable [`store::ViewState`], the role-filtered
//! menu, and one projection per screen in [`views`].
//!
//! # Conventions
//!
//! - **Time**: nothing reads the clock. Every derivation and mutation takes
//!   `now` explicitly.
//! - **Errors**: `thiserror` enums at fallible edges, `anyhow::Result` for
//!   config I/O.
//! - **Logging**: Use `tracing` macros (`warn!`, `debug!`, `trace!`).

pub mod access;
pub mod config;
pub mod derive;
pub mod error;
pub mod fixture;
pub mod model;
pub mod nav;
pub mod store;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Utc};

    use crate::model::{
        Milestone, MilestoneStatus, Notification, NotificationKind, Role, Task, TaskPriority,
        TaskStatus, TaskType, User,
    };

    pub fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    /// Unassigned medium-priority design task due far in the future.
    pub fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: String::new(),
            status,
            priority: TaskPriority::Medium,
            task_type: TaskType::Design,
            assigned_to: Vec::new(),
            created_by: "creator".to_string(),
            created_at: at("2026-01-01T00:00:00Z"),
            updated_at: at("2026-01-01T00:00:00Z"),
            due_date: at("2030-01-01T00:00:00Z"),
            milestone_id: String::new(),
            subtasks: Vec::new(),
            tags: Vec::new(),
            estimated_hours: None,
            actual_hours: None,
            attachments: Vec::new(),
            internal_notes: None,
            recurring: None,
        }
    }

    pub fn user(id: &str, name: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            role,
            avatar: None,
            department: None,
        }
    }

    pub fn milestone(id: &str, project_id: &str) -> Milestone {
        Milestone {
            id: id.to_string(),
            title: format!("Milestone {id}"),
            description: String::new(),
            project_id: project_id.to_string(),
            due_date: at("2030-01-01T00:00:00Z"),
            status: MilestoneStatus::Active,
            progress: 0,
        }
    }

    pub fn notification(id: &str, user_id: &str, read: bool) -> Notification {
        Notification {
            id: id.to_string(),
            user_id: user_id.to_string(),
            kind: NotificationKind::TaskAssigned,
            message: format!("Notification {id}"),
            task_id: None,
            read,
            created_at: at("2026-01-01T00:00:00Z"),
        }
    }
}
