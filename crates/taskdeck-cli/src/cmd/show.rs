//! `td show <id>`: the task detail overlay as a report.

use std::io::{self, Write};

use clap::Args;
use taskdeck_core::error::TaskdeckError;
use taskdeck_core::views::{TaskDetail, selected_detail};

use super::Workspace;
use crate::output::{
    bar, due_marker, pretty_kv, pretty_rule, pretty_section, render_mode, short_date,
};

/// Arguments for `td show`.
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Task ID to show.
    pub id: String,
}

pub fn run_show(args: &ShowArgs, ws: &Workspace) -> anyhow::Result<()> {
    let detail = load_detail(&args.id, ws)?;
    render_mode(ws.output, &detail, write_text, write_pretty)
}

fn load_detail(id: &str, ws: &Workspace) -> Result<TaskDetail, TaskdeckError> {
    let state = ws.state().select_task(Some(id));
    selected_detail(&state, &ws.session())
        .ok_or_else(|| TaskdeckError::TaskNotFound(id.to_string()))
}

fn write_text(d: &TaskDetail, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id  {}", d.id)?;
    writeln!(w, "title  {}", d.title)?;
    writeln!(w, "status  {}", d.status)?;
    writeln!(w, "priority  {}", d.priority)?;
    writeln!(w, "type  {}", d.task_type)?;
    writeln!(w, "due  {}", d.due_date.to_rfc3339())?;
    if let Some(creator) = &d.creator {
        writeln!(w, "creator  {}", creator.id)?;
    }
    for a in &d.assignees {
        writeln!(w, "assignee  {}  {}", a.id, a.name)?;
    }
    for s in &d.subtasks {
        writeln!(
            w,
            "subtask  {}  {}  {}",
            s.id,
            if s.completed { "done" } else { "open" },
            s.title
        )?;
    }
    if let Some(h) = d.hours {
        writeln!(w, "hours  {}/{}", h.actual, h.estimated)?;
    }
    writeln!(w, "editable  {}", d.can_edit)?;
    Ok(())
}

fn write_pretty(d: &TaskDetail, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("{}  {}", d.id, d.title))?;
    pretty_kv(w, "Status", d.status.label())?;
    pretty_kv(w, "Priority", d.priority.to_string())?;
    pretty_kv(w, "Type", d.task_type.to_string())?;
    pretty_kv(
        w,
        "Due",
        format!("{}{}", short_date(d.due_date), due_marker(d.due)),
    )?;
    if let Some(project) = &d.project {
        pretty_kv(w, "Project", project)?;
    }
    if let Some(milestone) = &d.milestone {
        pretty_kv(w, "Milestone", milestone)?;
    }
    if let Some(recurring) = &d.recurring {
        pretty_kv(w, "Repeats", recurring)?;
    }
    if let Some(creator) = &d.creator {
        pretty_kv(w, "Created by", &creator.name)?;
    }
    let assignees: Vec<_> = d
        .assignees
        .iter()
        .map(|a| format!("{} ({})", a.name, a.initials))
        .collect();
    pretty_kv(w, "Assignees", assignees.join(", "))?;
    if let Some(h) = d.hours {
        pretty_kv(w, "Hours", format!("{}/{}h", h.actual, h.estimated))?;
    }
    if !d.tags.is_empty() {
        pretty_kv(w, "Tags", d.tags.join(", "))?;
    }

    if !d.description.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", d.description)?;
    }

    if !d.subtasks.is_empty() {
        writeln!(w)?;
        pretty_section(
            w,
            &format!("Subtasks {} {}%", bar(d.subtask_progress, 10), d.subtask_progress),
        )?;
        for s in &d.subtasks {
            let mark = if s.completed { 'x' } else { ' ' };
            match &s.assignee {
                Some(name) => writeln!(w, "  [{mark}] {}  ({name})", s.title)?,
                None => writeln!(w, "  [{mark}] {}", s.title)?,
            }
        }
    }

    if !d.attachments.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Attachments")?;
        for a in &d.attachments {
            writeln!(w, "  {a}")?;
        }
    }

    if let Some(notes) = &d.internal_notes {
        writeln!(w)?;
        pretty_section(w, "Internal notes")?;
        writeln!(w, "{notes}")?;
    }

    pretty_rule(w)?;
    if d.can_edit {
        let options: Vec<_> = d.status_options.iter().map(ToString::to_string).collect();
        writeln!(w, "Editable: status can be set to {}", options.join(", "))
    } else {
        writeln!(w, "Read-only for your role.")
    }
}
