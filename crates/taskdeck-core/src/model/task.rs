use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};

/// The four board columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
}

impl TaskStatus {
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Completed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Completed => "completed",
        }
    }

    /// Column heading used by the board screens.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Completed => "Completed",
        }
    }
}

/// Four-level priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// Kind of work. Unknown values in fixture data collapse to [`TaskType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    Design,
    VideoEditing,
    Branding,
    Development,
    Revision,
    Deployment,
    Other,
}

impl TaskType {
    pub const ALL: [Self; 7] = [
        Self::Design,
        Self::VideoEditing,
        Self::Branding,
        Self::Development,
        Self::Revision,
        Self::Deployment,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::VideoEditing => "video-editing",
            Self::Branding => "branding",
            Self::Development => "development",
            Self::Revision => "revision",
            Self::Deployment => "deployment",
            Self::Other => "other",
        }
    }
}

impl From<String> for TaskType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Self::Other)
    }
}

impl From<TaskType> for String {
    fn from(value: TaskType) -> Self {
        value.as_str().to_string()
    }
}

/// How often a recurring task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Advisory recurrence descriptor. Nothing schedules new instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub frequency: Frequency,
    pub interval: u32,
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.interval <= 1 {
            f.write_str(self.frequency.as_str())
        } else {
            write!(f, "every {} ({})", self.interval, self.frequency.as_str())
        }
    }
}

/// Checklist item owned by a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// A unit of assignable work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub assigned_to: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub milestone_id: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurrence>,
}

impl Task {
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_to.iter().any(|id| id == user_id)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Number of subtasks marked complete.
    #[must_use]
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "todo" | "to-do" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEnumError::new("status", s)),
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseEnumError::new("priority", s)),
        }
    }
}

impl FromStr for TaskType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "design" => Ok(Self::Design),
            "video-editing" => Ok(Self::VideoEditing),
            "branding" => Ok(Self::Branding),
            "development" => Ok(Self::Development),
            "revision" => Ok(Self::Revision),
            "deployment" => Ok(Self::Deployment),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError::new("type", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_names_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&TaskType::VideoEditing).unwrap(),
            "\"video-editing\""
        );
        assert_eq!(
            serde_json::from_str::<TaskPriority>("\"urgent\"").unwrap(),
            TaskPriority::Urgent
        );
    }

    #[test]
    fn unknown_task_type_collapses_to_other() {
        let parsed: TaskType = serde_json::from_str("\"podcast\"").unwrap();
        assert_eq!(parsed, TaskType::Other);
        assert!("podcast".parse::<TaskType>().is_err());
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!("blocked".parse::<TaskStatus>().is_err());
        assert!("critical".parse::<TaskPriority>().is_err());
        assert_eq!("In Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
    }

    #[test]
    fn recurrence_display() {
        let weekly = Recurrence {
            frequency: Frequency::Weekly,
            interval: 1,
        };
        assert_eq!(weekly.to_string(), "weekly");
        let fortnightly = Recurrence {
            frequency: Frequency::Weekly,
            interval: 2,
        };
        assert_eq!(fortnightly.to_string(), "every 2 (weekly)");
    }

    #[test]
    fn task_deserializes_fixture_shape() {
        let json = r#"{
            "id": "t1",
            "title": "Logo refresh",
            "status": "review",
            "priority": "high",
            "type": "branding",
            "assignedTo": ["u1", "u2"],
            "createdBy": "u0",
            "createdAt": "2026-01-01T09:00:00Z",
            "updatedAt": "2026-01-02T09:00:00Z",
            "dueDate": "2026-01-10T17:00:00Z",
            "milestoneId": "m1",
            "subtasks": [{"id": "s1", "title": "Sketch", "completed": true}],
            "estimatedHours": 6.5
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.task_type, TaskType::Branding);
        assert!(task.is_assigned_to("u2"));
        assert!(!task.is_assigned_to("u3"));
        assert_eq!(task.completed_subtasks(), 1);
        assert!(task.tags.is_empty());
        assert!(task.actual_hours.is_none());
    }
}
