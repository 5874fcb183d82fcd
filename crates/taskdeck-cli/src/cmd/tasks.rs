//! `td tasks`: the session user's board, optionally filtered.

use std::io::{self, Write};
use std::str::FromStr;

use clap::Args;
use taskdeck_core::error::TaskdeckError;
use taskdeck_core::nav::ViewId;
use taskdeck_core::views::{TaskFilter, TasksView, task_board};

use super::{Workspace, write_card_pretty, write_card_text};
use crate::output::{pretty_rule, pretty_section, render_mode};

/// Arguments for `td tasks`.
#[derive(Args, Debug, Default, Clone)]
pub struct TasksArgs {
    /// Only tasks with this status (todo, in-progress, review, completed).
    #[arg(long)]
    pub status: Option<String>,

    /// Only tasks with this priority (low, medium, high, urgent).
    #[arg(long)]
    pub priority: Option<String>,

    /// Only tasks of this type (design, video-editing, branding, ...).
    #[arg(long = "type")]
    pub task_type: Option<String>,
}

/// `all` and an absent flag both mean "no constraint".
fn parse_criterion<T: FromStr>(raw: Option<&str>) -> Result<Option<T>, T::Err> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

impl TasksArgs {
    pub fn filter(&self) -> Result<TaskFilter, TaskdeckError> {
        Ok(TaskFilter {
            status: parse_criterion(self.status.as_deref())?,
            priority: parse_criterion(self.priority.as_deref())?,
            task_type: parse_criterion(self.task_type.as_deref())?,
        })
    }
}

pub fn run_tasks(args: &TasksArgs, ws: &Workspace) -> anyhow::Result<()> {
    let filter = args.filter()?;
    let state = ws.open(ViewId::Tasks)?;
    let view = task_board(&state, &ws.session(), filter);
    render_mode(ws.output, &view, write_text, write_pretty)
}

fn write_text(view: &TasksView, w: &mut dyn Write) -> io::Result<()> {
    for column in &view.columns {
        for card in &column.tasks {
            write_card_text(w, card)?;
        }
    }
    Ok(())
}

fn describe_filter(filter: &TaskFilter) -> String {
    let mut parts = Vec::new();
    if let Some(s) = filter.status {
        parts.push(format!("status={s}"));
    }
    if let Some(p) = filter.priority {
        parts.push(format!("priority={p}"));
    }
    if let Some(t) = filter.task_type {
        parts.push(format!("type={t}"));
    }
    parts.join(" ")
}

fn write_pretty(view: &TasksView, w: &mut dyn Write) -> io::Result<()> {
    let heading = if view.filter.is_empty() {
        format!("My Tasks ({})", view.total)
    } else {
        format!(
            "My Tasks ({} of {}, {})",
            view.shown,
            view.total,
            describe_filter(&view.filter)
        )
    };
    pretty_section(w, &heading)?;

    for column in &view.columns {
        writeln!(w, "{} ({})", column.label, column.tasks.len())?;
        for card in &column.tasks {
            write_card_pretty(w, card)?;
        }
    }

    if !view.available_types.is_empty() {
        pretty_rule(w)?;
        let types: Vec<_> = view.available_types.iter().map(ToString::to_string).collect();
        writeln!(w, "types: {}", types.join(", "))?;
    }
    Ok(())
}
