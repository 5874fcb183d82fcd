use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
}

impl ProjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    Active,
    Completed,
    OnHold,
}

impl MilestoneStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
        }
    }
}

/// Top-level grouping of milestones for a client or engagement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub status: ProjectStatus,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub team_members: Vec<String>,
    pub color: String,
}

/// A dated checkpoint grouping tasks under a project.
///
/// `progress` is whatever the fixture recorded. Screens show the value
/// computed from the milestone's tasks instead (see
/// [`crate::derive::progress::milestone_rollup`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub project_id: String,
    pub due_date: DateTime<Utc>,
    pub status: MilestoneStatus,
    #[serde(default)]
    pub progress: u8,
}

/// Resolve a milestone by id. Dangling references yield `None`.
#[must_use]
pub fn find_milestone<'a>(milestones: &'a [Milestone], id: &str) -> Option<&'a Milestone> {
    milestones.iter().find(|m| m.id == id)
}

/// Resolve a project by id. Dangling references yield `None`.
#[must_use]
pub fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "on-hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEnumError::new("project status", s)),
        }
    }
}

impl FromStr for MilestoneStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "on-hold" => Ok(Self::OnHold),
            _ => Err(ParseEnumError::new("milestone status", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::OnHold).unwrap(),
            "\"on-hold\""
        );
        assert_eq!(
            serde_json::from_str::<MilestoneStatus>("\"completed\"").unwrap(),
            MilestoneStatus::Completed
        );
        assert_eq!("On Hold".parse::<ProjectStatus>().unwrap(), ProjectStatus::OnHold);
        assert!("archived".parse::<MilestoneStatus>().is_err());
    }

    #[test]
    fn milestone_progress_defaults_to_zero() {
        let m: Milestone = serde_json::from_str(
            r#"{"id":"m1","title":"Beta","projectId":"p1","dueDate":"2026-03-01T00:00:00Z","status":"active"}"#,
        )
        .unwrap();
        assert_eq!(m.progress, 0);
        assert!(find_milestone(std::slice::from_ref(&m), "m1").is_some());
        assert!(find_milestone(&[m], "m9").is_none());
    }
}
