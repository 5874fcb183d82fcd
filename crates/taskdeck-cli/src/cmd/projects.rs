//! `td projects`: the read-only project viewer.

use std::io::{self, Write};

use taskdeck_core::nav::ViewId;
use taskdeck_core::views::{ProjectsView, project_viewer};

use super::{Workspace, write_card_pretty, write_card_text};
use crate::output::{bar, pretty_kv, pretty_rule, pretty_section, render_mode, short_date};

pub fn run_projects(ws: &Workspace) -> anyhow::Result<()> {
    let state = ws.open(ViewId::Viewer)?;
    let view = project_viewer(&state, &ws.session());
    render_mode(ws.output, &view, write_text, write_pretty)
}

fn write_text(view: &ProjectsView, w: &mut dyn Write) -> io::Result<()> {
    for p in &view.projects {
        writeln!(
            w,
            "project  {}  {}  {}%  {}",
            p.id, p.status, p.progress.percent, p.title
        )?;
        for m in &p.milestones {
            writeln!(
                w,
                "milestone  {}  {}  {}%  {}",
                m.id, m.status, m.progress.percent, m.title
            )?;
            for card in &m.tasks {
                write!(w, "task  ")?;
                write_card_text(w, card)?;
            }
        }
    }
    Ok(())
}

fn write_pretty(view: &ProjectsView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Project View")?;
    pretty_kv(w, "Projects", view.counts.projects.to_string())?;
    pretty_kv(w, "Milestones", view.counts.milestones.to_string())?;
    pretty_kv(w, "Completed", view.counts.completed_tasks.to_string())?;

    for p in &view.projects {
        writeln!(w)?;
        pretty_section(w, &format!("{} [{}]", p.title, p.status))?;
        if let Some(client) = &p.client {
            pretty_kv(w, "Client", client)?;
        }
        let span = p.end_date.map_or_else(
            || format!("from {}", short_date(p.start_date)),
            |end| format!("{} to {}", short_date(p.start_date), short_date(end)),
        );
        pretty_kv(w, "Dates", span)?;
        pretty_kv(
            w,
            "Progress",
            format!(
                "{} {}% ({}/{})",
                bar(p.progress.percent, 20),
                p.progress.percent,
                p.progress.completed,
                p.progress.total
            ),
        )?;
        if !p.description.is_empty() {
            writeln!(w, "{}", p.description)?;
        }

        for m in &p.milestones {
            writeln!(
                w,
                "\n  {} ({}, due {})  {} {}%",
                m.title,
                m.status,
                short_date(m.due_date),
                bar(m.progress.percent, 10),
                m.progress.percent
            )?;
            if m.tasks.is_empty() {
                writeln!(w, "    No tasks yet.")?;
            }
            for card in &m.tasks {
                write_card_pretty(w, card)?;
            }
        }
    }
    pretty_rule(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::{demo, rendered};

    #[test]
    fn text_nests_milestones_and_tasks() {
        let ws = demo("u6");
        let view = project_viewer(&ws.state(), &ws.session());
        let out = rendered(|w| write_text(&view, w));
        let count = |prefix: &str| out.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("project  "), 3);
        assert_eq!(count("milestone  "), 5);
        assert_eq!(count("task  "), 10);
    }

    #[test]
    fn pretty_marks_empty_milestones() {
        let ws = demo("u6");
        let view = project_viewer(&ws.state(), &ws.session());
        let out = rendered(|w| write_pretty(&view, w));
        assert!(out.contains("Client:"));
        assert!(out.contains("No tasks yet."));
    }
}
