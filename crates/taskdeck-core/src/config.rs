use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::derive::DEFAULT_DUE_SOON_DAYS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Which dataset to open and as whom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub user: Option<String>,
    /// Relative paths resolve against the project root.
    #[serde(default)]
    pub fixture: Option<PathBuf>,
}

/// Window sizes for the dashboard and team screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
    #[serde(default = "default_overdue_preview")]
    pub overdue_preview: usize,
    #[serde(default = "default_attention_limit")]
    pub attention_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            due_soon_days: default_due_soon_days(),
            upcoming_limit: default_upcoming_limit(),
            overdue_preview: default_overdue_preview(),
            attention_limit: default_attention_limit(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Reject view switches the session role is not offered.
    #[serde(default)]
    pub enforce_roles: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
    /// `None` means "use the fixture's current user".
    pub resolved_user: Option<String>,
    pub resolved_fixture: Option<PathBuf>,
}

/// Read `.taskdeck/config.toml` under `project_root`; absent means defaults.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".taskdeck/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// # Errors
///
/// Fails if the user config exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("taskdeck/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Command-line overrides fed into [`resolve_config`].
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub json: bool,
    pub format: Option<String>,
    pub user: Option<String>,
    pub fixture: Option<PathBuf>,
}

/// Merge flags, environment, project config and user config.
///
/// # Errors
///
/// Propagates config read and parse failures.
pub fn resolve_config(project_root: &Path, cli: &CliOverrides) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let env_user = env::var("TASKDECK_USER").ok();

    let resolved_output = resolve_output(
        cli.json,
        cli.format.clone(),
        user.output.clone(),
        env_format,
    );
    let resolved_user = resolve_user(
        cli.user.as_deref(),
        env_user.as_deref(),
        project.session.user.as_deref(),
        user.user.as_deref(),
    );
    let resolved_fixture = cli.fixture.clone().or_else(|| {
        project
            .session
            .fixture
            .as_ref()
            .map(|p| project_root.join(p))
    });

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
        resolved_user,
        resolved_fixture,
    })
}

/// First non-blank candidate wins: flag, env, project, user config.
fn resolve_user(
    cli: Option<&str>,
    env: Option<&str>,
    project: Option<&str>,
    user: Option<&str>,
) -> Option<String> {
    [cli, env, project, user]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|id| !id.is_empty())
        .map(str::to_string)
}

fn resolve_output(
    cli_json: bool,
    cli_format: Option<String>,
    user_output: Option<String>,
    env_format: Option<String>,
) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "plain" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    [cli_format, env_format, user_output]
        .iter()
        .flatten()
        .find_map(|raw| normalize_output_mode(raw))
        .map_or_else(
            || {
                if std::io::stdout().is_terminal() {
                    "pretty".to_string()
                } else {
                    "text".to_string()
                }
            },
            str::to_string,
        )
}

const fn default_due_soon_days() -> i64 {
    DEFAULT_DUE_SOON_DAYS
}

const fn default_upcoming_limit() -> usize {
    5
}

const fn default_overdue_preview() -> usize {
    4
}

const fn default_attention_limit() -> usize {
    6
}
