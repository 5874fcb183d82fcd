//! `td team`: workload per member, overdue work, active projects.

use std::io::{self, Write};

use taskdeck_core::nav::ViewId;
use taskdeck_core::views::{TeamView, team_overview};

use super::{Workspace, write_card_pretty, write_card_text};
use crate::output::{bar, pretty_kv, pretty_section, render_mode};

pub fn run_team(ws: &Workspace) -> anyhow::Result<()> {
    let state = ws.open(ViewId::Team)?;
    let view = team_overview(&state, &ws.session());
    render_mode(ws.output, &view, write_text, write_pretty)
}

fn write_text(view: &TeamView, w: &mut dyn Write) -> io::Result<()> {
    for m in &view.members {
        let s = &m.stats;
        writeln!(
            w,
            "member  {}  total={} completed={} in_progress={} overdue={} hours={} rate={}%  {}",
            s.user_id,
            s.total_tasks,
            s.completed_tasks,
            s.in_progress_tasks,
            s.overdue_tasks,
            s.total_hours,
            s.completion_rate,
            m.name
        )?;
    }
    for card in &view.attention {
        write!(w, "attention  ")?;
        write_card_text(w, card)?;
    }
    for p in &view.active_projects {
        writeln!(
            w,
            "project  {}  tasks={} progress={}%  {}",
            p.id, p.task_count, p.progress.percent, p.title
        )?;
    }
    Ok(())
}

fn write_pretty(view: &TeamView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Team Overview")?;
    pretty_kv(w, "Members", view.members.len().to_string())?;
    pretty_kv(w, "Overdue", view.overdue_total.to_string())?;
    pretty_kv(w, "In review", view.in_review.to_string())?;

    writeln!(w)?;
    pretty_section(w, "Workload")?;
    for m in &view.members {
        let s = &m.stats;
        writeln!(
            w,
            "  {:<3} {:<18} {:<9} {:>2} tasks  {:>2} active  {:>2} overdue  {:>5.1}h  {} {:>3}%",
            m.initials,
            m.name,
            m.role.as_str(),
            s.total_tasks,
            s.in_progress_tasks,
            s.overdue_tasks,
            s.total_hours,
            bar(s.completion_rate, 10),
            s.completion_rate
        )?;
    }

    if !view.attention.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Attention required")?;
        for card in &view.attention {
            write_card_pretty(w, card)?;
        }
    }

    writeln!(w)?;
    pretty_section(w, "Active projects")?;
    for p in &view.active_projects {
        let client = p.client.as_deref().unwrap_or("internal");
        writeln!(
            w,
            "  {:<24} {:<14} {:>2} tasks  {} {:>3}%",
            p.title,
            client,
            p.task_count,
            bar(p.progress.percent, 10),
            p.progress.percent
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::{demo, rendered};

    #[test]
    fn text_has_one_line_per_member() {
        let ws = demo("u2");
        let view = team_overview(&ws.state(), &ws.session());
        let out = rendered(|w| write_text(&view, w));
        let members = out.lines().filter(|l| l.starts_with("member  ")).count();
        assert_eq!(members, view.members.len());
        assert!(out.contains("attention  t7"));
        assert!(out.contains("project  p1"));
        assert!(!out.contains("project  p3"));
    }

    #[test]
    fn pretty_shows_attention_and_projects() {
        let ws = demo("u1");
        let view = team_overview(&ws.state(), &ws.session());
        let out = rendered(|w| write_pretty(&view, w));
        assert!(out.contains("Attention required"));
        assert!(out.contains("Emily Rodriguez"));
        assert!(out.contains("Northwind"));
    }
}
