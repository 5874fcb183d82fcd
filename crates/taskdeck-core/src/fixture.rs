//! Fixture provider: the dataset a session runs against.
//!
//! A fixture is either a file on disk (`.json`, `.toml`, `.yaml`/`.yml`) or
//! the built-in demo agency from [`Fixture::demo`]. Nothing is validated
//! beyond what serde enforces; dangling references are logged and tolerated.
//! TOML fixtures must quote timestamps as RFC 3339 strings.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ErrorCode;
use crate::model::{
    Frequency, Milestone, MilestoneStatus, Notification, NotificationKind, Project,
    ProjectStatus, Recurrence, Role, Subtask, Task, TaskPriority, TaskStatus, TaskType, User,
    find_milestone, find_project, find_user,
};

/// On-disk fixture encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    Json,
    Toml,
    Yaml,
}

impl FixtureFormat {
    /// Pick the format from the file extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for FixtureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported fixture extension for {} (expected .json, .toml, .yaml or .yml)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse {format} fixture {origin}: {message}")]
    Parse {
        origin: String,
        format: FixtureFormat,
        message: String,
    },

    #[error("no session user: the fixture names no current user and none was given")]
    NoCurrentUser,

    #[error("user '{0}' not found in fixture")]
    UnknownUser(String),
}

impl FixtureError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::FixtureLoadFailed,
            Self::UnsupportedFormat { .. } | Self::Parse { .. } => ErrorCode::FixtureInvalid,
            Self::NoCurrentUser | Self::UnknownUser(_) => ErrorCode::UnknownUser,
        }
    }
}

/// Users, work items and the optional default session user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user: Option<String>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl Fixture {
    /// Load a fixture file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if the extension is unknown, the file cannot
    /// be read, or its contents do not deserialize.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let format =
            FixtureFormat::from_path(path).ok_or_else(|| FixtureError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let fixture = Self::parse(&text, format, &path.display().to_string())?;
        debug!(
            path = %path.display(),
            %format,
            users = fixture.users.len(),
            tasks = fixture.tasks.len(),
            "loaded fixture"
        );
        for note in fixture.dangling_references() {
            warn!(%note, "dangling reference in fixture");
        }
        Ok(fixture)
    }

    /// Parse fixture text. `origin` only labels errors.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] on malformed input.
    pub fn parse(text: &str, format: FixtureFormat, origin: &str) -> Result<Self, FixtureError> {
        let parsed = match format {
            FixtureFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            FixtureFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            FixtureFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| FixtureError::Parse {
            origin: origin.to_string(),
            format,
            message,
        })
    }

    /// The session user: `requested` if given, else the fixture's current
    /// user.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrentUser`] when neither is set and
    /// [`FixtureError::UnknownUser`] when the id is not in `users`.
    pub fn resolve_user(&self, requested: Option<&str>) -> Result<&User, FixtureError> {
        let id = requested
            .or(self.current_user.as_deref())
            .ok_or(FixtureError::NoCurrentUser)?;
        find_user(&self.users, id).ok_or_else(|| FixtureError::UnknownUser(id.to_string()))
    }

    /// Human-readable notes for every id that points nowhere.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<String> {
        let mut notes = Vec::new();
        for task in &self.tasks {
            if find_milestone(&self.milestones, &task.milestone_id).is_none() {
                notes.push(format!(
                    "task {} references unknown milestone {}",
                    task.id, task.milestone_id
                ));
            }
            for assignee in &task.assigned_to {
                if find_user(&self.users, assignee).is_none() {
                    notes.push(format!("task {} assigned to unknown user {assignee}", task.id));
                }
            }
        }
        for milestone in &self.milestones {
            if find_project(&self.projects, &milestone.project_id).is_none() {
                notes.push(format!(
                    "milestone {} references unknown project {}",
                    milestone.id, milestone.project_id
                ));
            }
        }
        notes
    }

    /// A small design agency, with every date placed relative to `now` so the
    /// overdue and due-soon screens always have something to show.
    #[must_use]
    pub fn demo(now: DateTime<Utc>) -> Self {
        let at = |days: i64, hours: i64| {
            now.checked_add_signed(Duration::days(days) + Duration::hours(hours))
                .unwrap_or(now)
        };

        let users = vec![
            demo_user("u1", "Sarah Chen", Role::Admin, Some("Operations")),
            demo_user("u2", "Marcus Johnson", Role::Manager, Some("Creative")),
            demo_user("u3", "Emily Rodriguez", Role::Employee, Some("Design")),
            demo_user("u4", "David Kim", Role::Employee, Some("Video")),
            demo_user("u5", "Priya Patel", Role::Employee, Some("Engineering")),
            demo_user("u6", "Alex Morgan", Role::Viewer, None),
        ];

        let projects = vec![
            Project {
                id: "p1".into(),
                title: "Brand Refresh".into(),
                description: "New identity system and guidelines".into(),
                client: Some("Acme Corp".into()),
                status: ProjectStatus::Active,
                start_date: at(-30, 0),
                end_date: Some(at(45, 0)),
                team_members: vec!["u2".into(), "u3".into(), "u5".into()],
                color: "#3B82F6".into(),
            },
            Project {
                id: "p2".into(),
                title: "Product Launch Video".into(),
                description: "Ninety-second launch spot plus cut-downs".into(),
                client: Some("Northwind".into()),
                status: ProjectStatus::Active,
                start_date: at(-14, 0),
                end_date: Some(at(20, 0)),
                team_members: vec!["u2".into(), "u4".into()],
                color: "#10B981".into(),
            },
            Project {
                id: "p3".into(),
                title: "Website Redesign".into(),
                description: "Marketing site rebuild".into(),
                client: None,
                status: ProjectStatus::Planning,
                start_date: at(10, 0),
                end_date: None,
                team_members: vec!["u5".into()],
                color: "#8B5CF6".into(),
            },
        ];

        let milestones = vec![
            demo_milestone("m1", "Logo concepts", "p1", at(-2, 0), MilestoneStatus::Active),
            demo_milestone("m2", "Brand guidelines", "p1", at(21, 0), MilestoneStatus::Active),
            demo_milestone("m3", "Storyboard", "p2", at(-7, 0), MilestoneStatus::Completed),
            demo_milestone("m4", "Final cut", "p2", at(12, 0), MilestoneStatus::Active),
            demo_milestone("m5", "Discovery", "p3", at(30, 0), MilestoneStatus::OnHold),
        ];

        let mut tasks = vec![
            demo_task(
                "t1",
                "Sketch logo directions",
                (TaskStatus::InProgress, TaskPriority::High, TaskType::Design),
                &["u3"],
                "m1",
                (at(-10, 0), at(-1, 0)),
            ),
            demo_task(
                "t2",
                "Present logo shortlist",
                (TaskStatus::Review, TaskPriority::Urgent, TaskType::Branding),
                &["u3", "u2"],
                "m1",
                (at(-8, 0), at(1, 4)),
            ),
            demo_task(
                "t3",
                "Color palette exploration",
                (TaskStatus::Completed, TaskPriority::Medium, TaskType::Design),
                &["u3"],
                "m1",
                (at(-20, 0), at(-5, 0)),
            ),
            demo_task(
                "t4",
                "Typography pairing",
                (TaskStatus::Todo, TaskPriority::Medium, TaskType::Design),
                &["u3"],
                "m2",
                (at(-3, 0), at(9, 0)),
            ),
            demo_task(
                "t5",
                "Guidelines site scaffold",
                (TaskStatus::Todo, TaskPriority::Low, TaskType::Development),
                &["u5"],
                "m2",
                (at(-3, 0), at(18, 0)),
            ),
            demo_task(
                "t6",
                "Storyboard frames",
                (TaskStatus::Completed, TaskPriority::High, TaskType::Design),
                &["u4", "u3"],
                "m3",
                (at(-14, 0), at(-7, 0)),
            ),
            demo_task(
                "t7",
                "Rough cut",
                (TaskStatus::InProgress, TaskPriority::Urgent, TaskType::VideoEditing),
                &["u4"],
                "m4",
                (at(-6, 0), at(-2, 0)),
            ),
            demo_task(
                "t8",
                "Client revision round",
                (TaskStatus::Todo, TaskPriority::High, TaskType::Revision),
                &["u4", "u2"],
                "m4",
                (at(-1, 0), at(2, 0)),
            ),
            demo_task(
                "t9",
                "Publish launch assets",
                (TaskStatus::Todo, TaskPriority::Medium, TaskType::Deployment),
                &["u5", "u4"],
                "m4",
                (at(-1, 0), at(12, 0)),
            ),
            demo_task(
                "t10",
                "Weekly status report",
                (TaskStatus::InProgress, TaskPriority::Low, TaskType::Other),
                &["u2"],
                "m2",
                (at(-4, 0), at(0, 6)),
            ),
        ];

        let hours: [(f64, Option<f64>); 10] = [
            (8.0, Some(6.5)),
            (4.0, Some(3.0)),
            (6.0, Some(7.5)),
            (5.0, None),
            (12.0, None),
            (10.0, Some(9.0)),
            (16.0, Some(11.0)),
            (6.0, None),
            (3.0, None),
            (1.0, Some(0.5)),
        ];
        for (task, (estimated, actual)) in tasks.iter_mut().zip(hours) {
            task.estimated_hours = Some(estimated);
            task.actual_hours = actual;
        }

        tasks[0].subtasks = vec![
            demo_subtask("s1", "Wordmark variants", true),
            demo_subtask("s2", "Symbol variants", false),
            demo_subtask("s3", "Lockups", false),
        ];
        tasks[0].tags = vec!["logo".into(), "concepts".into()];
        tasks[1].tags = vec!["client".into(), "presentation".into()];
        tasks[1].internal_notes = Some("Client prefers the geometric mark.".into());
        tasks[6].subtasks = vec![
            demo_subtask("s4", "Assemble selects", true),
            demo_subtask("s5", "Temp music", true),
            demo_subtask("s6", "Titles", false),
        ];
        tasks[6].tags = vec!["video".into(), "edit".into(), "launch".into(), "v1".into()];
        tasks[6].attachments = vec!["rough-cut-v1.mp4".into()];
        tasks[7].internal_notes = Some("Budget allows one more round.".into());
        tasks[9].recurring = Some(Recurrence {
            frequency: Frequency::Weekly,
            interval: 1,
        });

        let mut notifications = vec![
            demo_notification(
                "n1",
                "u3",
                NotificationKind::DeadlineApproaching,
                "Present logo shortlist is due tomorrow",
                Some("t2"),
                at(0, -3),
            ),
            demo_notification(
                "n2",
                "u3",
                NotificationKind::TaskAssigned,
                "You were assigned to Typography pairing",
                Some("t4"),
                at(-3, 0),
            ),
            demo_notification(
                "n3",
                "u3",
                NotificationKind::TaskCompleted,
                "Storyboard frames was marked complete",
                Some("t6"),
                at(-7, 0),
            ),
            demo_notification(
                "n4",
                "u4",
                NotificationKind::RevisionRequested,
                "Northwind requested changes to the rough cut",
                Some("t7"),
                at(-1, 0),
            ),
            demo_notification(
                "n5",
                "u2",
                NotificationKind::TaskAssigned,
                "You were assigned to Client revision round",
                Some("t8"),
                at(-1, 0),
            ),
        ];
        notifications[2].read = true;

        Self {
            current_user: Some("u3".into()),
            users,
            projects,
            milestones,
            tasks,
            notifications,
        }
    }
}

fn demo_user(id: &str, name: &str, role: Role, department: Option<&str>) -> User {
    let handle = name.split_whitespace().next().unwrap_or(id).to_lowercase();
    User {
        id: id.into(),
        name: name.into(),
        email: format!("{handle}@studio.example"),
        role,
        avatar: None,
        department: department.map(str::to_string),
    }
}

fn demo_milestone(
    id: &str,
    title: &str,
    project_id: &str,
    due_date: DateTime<Utc>,
    status: MilestoneStatus,
) -> Milestone {
    Milestone {
        id: id.into(),
        title: title.into(),
        description: String::new(),
        project_id: project_id.into(),
        due_date,
        status,
        progress: 0,
    }
}

fn demo_task(
    id: &str,
    title: &str,
    (status, priority, task_type): (TaskStatus, TaskPriority, TaskType),
    assignees: &[&str],
    milestone_id: &str,
    (created_at, due_date): (DateTime<Utc>, DateTime<Utc>),
) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        description: String::new(),
        status,
        priority,
        task_type,
        assigned_to: assignees.iter().map(|s| (*s).to_string()).collect(),
        created_by: "u2".into(),
        created_at,
        updated_at: created_at,
        due_date,
        milestone_id: milestone_id.into(),
        subtasks: Vec::new(),
        tags: Vec::new(),
        estimated_hours: None,
        actual_hours: None,
        attachments: Vec::new(),
        internal_notes: None,
        recurring: None,
    }
}

fn demo_subtask(id: &str, title: &str, completed: bool) -> Subtask {
    Subtask {
        id: id.into(),
        title: title.into(),
        completed,
        assigned_to: None,
    }
}

fn demo_notification(
    id: &str,
    user_id: &str,
    kind: NotificationKind,
    message: &str,
    task_id: Option<&str>,
    created_at: DateTime<Utc>,
) -> Notification {
    Notification {
        id: id.into(),
        user_id: user_id.into(),
        kind,
        message: message.into(),
        task_id: task_id.map(str::to_string),
        read: false,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;

    const YAML: &str = r#"
currentUser: e1
users:
  - id: e1
    name: Eve Lin
    email: eve@example.com
    role: employee
tasks:
  - id: t1
    title: Cut teaser
    status: in-progress
    priority: high
    type: motion-graphics
    assignedTo: [e1, ghost]
    createdBy: e1
    createdAt: "2026-01-01T00:00:00Z"
    updatedAt: "2026-01-01T00:00:00Z"
    dueDate: "2026-01-05T00:00:00Z"
    milestoneId: nowhere
"#;

    #[test]
    fn yaml_fixture_tolerates_unknown_type_and_dangling_ids() {
        let fixture = Fixture::parse(YAML, FixtureFormat::Yaml, "inline").expect("parse");
        assert_eq!(fixture.tasks[0].task_type, TaskType::Other);
        assert!(fixture.projects.is_empty());
        let notes = fixture.dangling_references();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().any(|n| n.contains("ghost")));
    }

    #[test]
    fn toml_fixture_parses_quoted_timestamps() {
        let text = r#"
currentUser = "v1"

[[users]]
id = "v1"
name = "Vic Viewer"
email = "vic@example.com"
role = "viewer"

[[notifications]]
id = "n1"
userId = "v1"
type = "task-completed"
message = "Done"
createdAt = "2026-02-01T09:30:00Z"
"#;
        let fixture = Fixture::parse(text, FixtureFormat::Toml, "inline").expect("parse");
        assert_eq!(fixture.users[0].role, Role::Viewer);
        assert_eq!(fixture.notifications[0].created_at, at("2026-02-01T09:30:00Z"));
    }

    #[test]
    fn malformed_fixture_reports_format_and_origin() {
        let err = Fixture::parse("{ not json", FixtureFormat::Json, "bad.json").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::FixtureInvalid);
        let text = err.to_string();
        assert!(text.contains("json"));
        assert!(text.contains("bad.json"));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("team.YML");
        std::fs::write(&path, YAML).expect("write");
        let fixture = Fixture::load(&path).expect("load");
        assert_eq!(fixture.users.len(), 1);

        let unknown = dir.path().join("team.csv");
        std::fs::write(&unknown, "").expect("write");
        assert!(matches!(
            Fixture::load(&unknown),
            Err(FixtureError::UnsupportedFormat { .. })
        ));

        let missing = dir.path().join("absent.json");
        let err = Fixture::load(&missing).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::FixtureLoadFailed);
    }

    #[test]
    fn resolve_user_prefers_request_then_current() {
        let fixture = Fixture::demo(at("2026-06-01T12:00:00Z"));
        assert_eq!(fixture.resolve_user(None).unwrap().id, "u3");
        assert_eq!(fixture.resolve_user(Some("u6")).unwrap().role, Role::Viewer);
        assert!(matches!(
            fixture.resolve_user(Some("zz")),
            Err(FixtureError::UnknownUser(id)) if id == "zz"
        ));

        let empty = Fixture::default();
        assert!(matches!(
            empty.resolve_user(None),
            Err(FixtureError::NoCurrentUser)
        ));
    }

    #[test]
    fn demo_is_consistent_and_round_trips_through_json() {
        let now = at("2026-06-01T12:00:00Z");
        let demo = Fixture::demo(now);
        assert!(demo.dangling_references().is_empty());
        assert!(demo.tasks.iter().any(|t| t.due_date < now && !t.is_completed()));

        let json = serde_json::to_string(&demo).expect("serialize");
        let back = Fixture::parse(&json, FixtureFormat::Json, "demo").expect("parse");
        assert_eq!(back, demo);
    }
}
