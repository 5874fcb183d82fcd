use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    TaskAssigned,
    DeadlineApproaching,
    TaskCompleted,
    RevisionRequested,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task-assigned",
            Self::DeadlineApproaching => "deadline-approaching",
            Self::TaskCompleted => "task-completed",
            Self::RevisionRequested => "revision-requested",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "task-assigned" => Ok(Self::TaskAssigned),
            "deadline-approaching" => Ok(Self::DeadlineApproaching),
            "task-completed" => Ok(Self::TaskCompleted),
            "revision-requested" => Ok(Self::RevisionRequested),
            _ => Err(ParseEnumError::new("notification type", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_type_field_is_renamed() {
        let n: Notification = serde_json::from_str(
            r#"{"id":"n1","userId":"u1","type":"deadline-approaching","message":"Soon","createdAt":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(n.kind, NotificationKind::DeadlineApproaching);
        assert!(!n.read);
        assert!(n.task_id.is_none());

        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "deadline-approaching");
        assert!(json.get("taskId").is_none());
    }
}
