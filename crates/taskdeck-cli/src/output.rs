//! Shared output layer for pretty/text/JSON parity across all `td` commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its screen
//! projection accordingly: framed sections for humans, one record per line
//! for pipes, or the projection itself as JSON.
//!
//! Which mode wins: an explicit `--format` (or `--json`), then the `FORMAT`
//! environment variable, then `output` from the user config, and finally
//! pretty on a terminal or text on a pipe.
//!
//! The first three are merged by `taskdeck_core::config::resolve_config`; this
//! module only turns the resolved string back into an [`OutputMode`].
//! [`resolve_output_mode`] covers the window before config is loaded, so a
//! broken config file still reports its error in the requested format.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use taskdeck_core::derive::DueIndicator;
use taskdeck_core::error::{ErrorCode, TaskdeckError};
use taskdeck_core::fixture::FixtureError;

pub const PRETTY_RULE_WIDTH: usize = 72;

pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Heading line underlined with a rule.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// `Label:      value`, labels padded to one column.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// `Mar 04, 2026`, the date format every screen uses.
pub fn short_date(at: DateTime<Utc>) -> String {
    at.format("%b %d, %Y").to_string()
}

/// Suffix shown after a due date in human output.
pub const fn due_marker(due: DueIndicator) -> &'static str {
    match due {
        DueIndicator::Overdue => " (overdue)",
        DueIndicator::DueSoon => " (due soon)",
        DueIndicator::Done | DueIndicator::Normal => "",
    }
}

/// Stable token for a due indicator in text output.
pub const fn due_label(due: DueIndicator) -> &'static str {
    match due {
        DueIndicator::Overdue => "overdue",
        DueIndicator::DueSoon => "due-soon",
        DueIndicator::Done => "done",
        DueIndicator::Normal => "-",
    }
}

/// Plain-text progress bar, `width` cells wide.
pub fn bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Framed sections and progress bars for a person at a terminal.
    Pretty,
    /// One record per line for scripts and pipes.
    Text,
    /// The screen projection as JSON.
    Json,
}

impl OutputMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Case-insensitive parse of a mode name.
    pub fn parse(raw: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(raw.trim(), true).ok()
    }

    /// Map the string config resolution produced. It only ever produces
    /// valid names, so anything else is treated as pretty.
    pub fn from_resolved(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(Self::Pretty)
    }

    pub const fn is_pretty(self) -> bool {
        matches!(self, Self::Pretty)
    }
}

fn pick_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    stdout_is_tty: bool,
) -> OutputMode {
    let tty_default = if stdout_is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    };
    format_flag
        .or_else(|| json_flag.then_some(OutputMode::Json))
        .or_else(|| format_env.and_then(OutputMode::parse))
        .unwrap_or(tty_default)
}

/// Mode to use before config is loaded: flags, `FORMAT`, then the TTY
/// default.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let format_env = std::env::var("FORMAT").ok();
    pick_output_mode(
        format_flag,
        json_flag,
        format_env.as_deref(),
        io::stdout().is_terminal(),
    )
}

/// Print `value` to stdout with the renderer matching `mode`; JSON needs no
/// renderer.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_mode(&mut out, mode, value, text_fn, pretty_fn)
}

/// [`render_mode`] against any writer.
pub fn write_mode<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, out)?,
        OutputMode::Pretty => pretty_fn(value, out)?,
    }
    Ok(())
}

/// What `td` prints when a command fails.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    /// Remediation hint from the error catalogue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable machine-readable code, e.g. `E2002`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Attach `code` and its catalogue hint.
    pub fn with_code(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }

    /// Classify an error bubbling out of a command. Core errors carry their
    /// own code; anything else gets `fallback`.
    pub fn from_anyhow(err: &anyhow::Error, fallback: ErrorCode) -> Self {
        if let Some(e) = err.downcast_ref::<TaskdeckError>() {
            return Self::from(e);
        }
        if let Some(e) = err.downcast_ref::<FixtureError>() {
            return Self::from(e);
        }
        Self::with_code(format!("{err:#}"), fallback)
    }
}

impl From<&TaskdeckError> for CliError {
    fn from(err: &TaskdeckError) -> Self {
        Self::with_code(err.to_string(), err.error_code())
    }
}

impl From<&FixtureError> for CliError {
    fn from(err: &FixtureError) -> Self {
        Self::with_code(err.to_string(), err.error_code())
    }
}

/// Report a failure on stderr. JSON mode wraps it as `{"error": {...}}`.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    write_error(&mut io::stderr().lock(), mode, error)
}

fn write_error(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, &serde_json::json!({ "error": error }))?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            let tag = error
                .error_code
                .as_deref()
                .map_or_else(|| "error".to_string(), |code| format!("error[{code}]"));
            writeln!(out, "{tag}: {}", error.message)?;
            if let Some(hint) = &error.suggestion {
                writeln!(out, "  suggestion: {hint}")?;
            }
        }
    }
    Ok(())
}
