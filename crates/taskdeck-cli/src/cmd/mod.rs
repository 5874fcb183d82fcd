pub mod analytics;
pub mod completions;
pub mod dashboard;
pub mod fixture;
pub mod menu;
pub mod notifications;
pub mod projects;
pub mod show;
pub mod tasks;
pub mod team;

use anyhow::Context;
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use taskdeck_core::config::{CliOverrides, DisplayConfig, resolve_config};
use taskdeck_core::error::TaskdeckError;
use taskdeck_core::fixture::Fixture;
use taskdeck_core::model::User;
use taskdeck_core::nav::ViewId;
use taskdeck_core::store::ViewState;
use taskdeck_core::views::{Session, TaskCard};
use tracing::debug;

use crate::output::{OutputMode, bar, due_label, due_marker, short_date};

/// Where the dataset came from, for `td fixture` and the settings screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Demo,
    File(PathBuf),
}

impl Source {
    pub fn describe(&self) -> String {
        match self {
            Self::Demo => "built-in demo".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Global flags every command shares.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub format: Option<OutputMode>,
    pub json: bool,
    pub user: Option<String>,
    pub fixture: Option<PathBuf>,
    pub now: Option<DateTime<Utc>>,
}

/// Everything a command needs: the dataset, who is looking, and how to
/// print.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub fixture: Fixture,
    pub user: User,
    pub source: Source,
    pub display: DisplayConfig,
    pub enforce_roles: bool,
    pub now: DateTime<Utc>,
    pub output: OutputMode,
}

impl Workspace {
    /// Resolve config under `project_root`, load the dataset and pick the
    /// session user.
    pub fn load(globals: &GlobalArgs, project_root: &Path) -> anyhow::Result<Self> {
        let overrides = CliOverrides {
            json: globals.json,
            format: globals.format.map(|m| m.as_str().to_string()),
            user: globals.user.clone(),
            fixture: globals.fixture.clone(),
        };
        let config = resolve_config(project_root, &overrides)
            .context("Failed to resolve taskdeck configuration")?;
        let now = globals.now.unwrap_or_else(Utc::now);

        let (fixture, source) = match config.resolved_fixture {
            Some(path) => (
                Fixture::load(&path).map_err(TaskdeckError::from)?,
                Source::File(path),
            ),
            None => (Fixture::demo(now), Source::Demo),
        };
        let user = fixture
            .resolve_user(config.resolved_user.as_deref())
            .map_err(TaskdeckError::from)?
            .clone();

        debug!(
            source = %source.describe(),
            user = %user.id,
            role = %user.role,
            output = %config.resolved_output,
            "workspace ready"
        );

        Ok(Self {
            fixture,
            user,
            source,
            display: config.project.display,
            enforce_roles: config.project.navigation.enforce_roles,
            now,
            output: OutputMode::from_resolved(&config.resolved_output),
        })
    }

    pub fn session(&self) -> Session<'_> {
        Session::new(&self.fixture, &self.user, self.display.clone(), self.now)
    }

    /// Fresh snapshot scoped to the session user.
    pub fn state(&self) -> ViewState {
        ViewState::for_user(
            self.fixture.tasks.clone(),
            self.fixture.notifications.clone(),
            &self.user,
        )
    }

    /// Snapshot with `view` active, refused when role enforcement is on and
    /// the role may not open it.
    pub fn open(&self, view: ViewId) -> Result<ViewState, TaskdeckError> {
        let state = self.state();
        if self.enforce_roles {
            Ok(state.try_set_active_view(view, &self.session().caps)?)
        } else {
            Ok(state.set_active_view(view))
        }
    }
}

/// One card per line: id, status, priority, due day, due flag, title.
pub(crate) fn write_card_text(w: &mut dyn Write, card: &TaskCard) -> io::Result<()> {
    writeln!(
        w,
        "{}  {}  {}  {}  {}  {}",
        card.id,
        card.status,
        card.priority,
        card.due_date.format("%Y-%m-%d"),
        due_label(card.due),
        card.title
    )
}

/// Two-line card for pretty output.
pub(crate) fn write_card_pretty(w: &mut dyn Write, card: &TaskCard) -> io::Result<()> {
    let recurring = if card.recurring { " (recurring)" } else { "" };
    writeln!(w, "  {:<5} {}{recurring}", card.id, card.title)?;

    let mut people = card.assignees.join(" ");
    if card.more_assignees > 0 {
        people.push_str(&format!(" +{}", card.more_assignees));
    }
    write!(
        w,
        "        {} | {} | due {}{} | {}",
        card.status.label(),
        card.priority,
        short_date(card.due_date),
        due_marker(card.due),
        people
    )?;
    if let Some(subtasks) = card.subtasks {
        write!(
            w,
            " | subtasks {}/{} {}",
            subtasks.completed,
            subtasks.total,
            bar(subtasks.percent, 10)
        )?;
    }
    if !card.tags.is_empty() {
        write!(w, " | #{}", card.tags.join(" #"))?;
    }
    writeln!(w)
}


#[cfg(test)]
mod tests {
    use super::testing::demo;
    use super::*;
    use taskdeck_core::error::ErrorCode;

    #[test]
    fn state_is_scoped_to_the_session_user() {
        let ws = demo("u3");
        let state = ws.state();
        assert_eq!(state.active_view(), ViewId::Dashboard);
        assert_eq!(state.unread_count(), 2);
        assert_eq!(state.tasks().len(), ws.fixture.tasks.len());
    }

    #[test]
    fn open_is_advisory_unless_enforced() {
        let mut ws = demo("u3");
        assert_eq!(ws.open(ViewId::Team).unwrap().active_view(), ViewId::Team);

        ws.enforce_roles = true;
        let err = ws.open(ViewId::Team).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ViewNotPermitted);
        assert!(ws.open(ViewId::Tasks).is_ok());
    }

    #[test]
    fn load_reads_fixture_file_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let now = testing::at("2026-06-01T12:00:00Z");
        let demo_fixture = Fixture::demo(now);
        std::fs::write(&path, serde_json::to_string(&demo_fixture).unwrap()).unwrap();

        let globals = GlobalArgs {
            format: Some(OutputMode::Json),
            user: Some("u2".into()),
            fixture: Some(path.clone()),
            now: Some(now),
            ..GlobalArgs::default()
        };
        let ws = Workspace::load(&globals, dir.path()).unwrap();
        assert_eq!(ws.user.id, "u2");
        assert_eq!(ws.source, Source::File(path));
        assert_eq!(ws.output, OutputMode::Json);
        assert_eq!(ws.fixture.tasks.len(), 10);
    }

    #[test]
    fn load_rejects_unknown_user() {
        let dir = tempfile::tempdir().unwrap();
        let globals = GlobalArgs {
            user: Some("nobody".into()),
            ..GlobalArgs::default()
        };
        let err = Workspace::load(&globals, dir.path()).unwrap_err();
        let core = err.downcast_ref::<TaskdeckError>().unwrap();
        assert_eq!(core.error_code(), ErrorCode::UnknownUser);
    }
}
