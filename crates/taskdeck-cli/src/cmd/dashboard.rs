//! `td dashboard`: greeting, stat tiles, overdue and upcoming work.

use std::io::{self, Write};

use taskdeck_core::nav::ViewId;
use taskdeck_core::views::{DashboardView, dashboard};

use super::{Workspace, write_card_pretty, write_card_text};
use crate::output::{bar, pretty_kv, pretty_section, render_mode, short_date};

pub fn run_dashboard(ws: &Workspace) -> anyhow::Result<()> {
    let state = ws.open(ViewId::Dashboard)?;
    let view = dashboard(&state, &ws.session());
    render_mode(ws.output, &view, write_text, write_pretty)
}

fn write_text(view: &DashboardView, w: &mut dyn Write) -> io::Result<()> {
    let s = &view.stats;
    writeln!(
        w,
        "stats  in_progress={} overdue={} completed={} total={} due_today={}",
        s.in_progress, s.overdue, s.completed, s.total, view.due_today
    )?;
    for card in &view.overdue {
        write!(w, "overdue  ")?;
        write_card_text(w, card)?;
    }
    for card in &view.upcoming {
        write!(w, "upcoming  ")?;
        write_card_text(w, card)?;
    }
    for m in &view.milestones {
        writeln!(
            w,
            "milestone  {}  {}%  {}/{}  {}",
            m.id, m.progress.percent, m.progress.completed, m.progress.total, m.title
        )?;
    }
    Ok(())
}

fn write_pretty(view: &DashboardView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &view.greeting)?;
    let s = &view.stats;
    pretty_kv(w, "In progress", s.in_progress.to_string())?;
    pretty_kv(w, "Overdue", s.overdue.to_string())?;
    pretty_kv(w, "Completed", s.completed.to_string())?;
    pretty_kv(w, "Total", s.total.to_string())?;
    if view.due_today > 0 {
        pretty_kv(w, "Due today", view.due_today.to_string())?;
    }

    if !view.overdue.is_empty() {
        writeln!(w)?;
        pretty_section(w, &format!("Overdue ({})", view.overdue_total))?;
        for card in &view.overdue {
            write_card_pretty(w, card)?;
        }
        let hidden = view.overdue_total.saturating_sub(view.overdue.len());
        if hidden > 0 {
            writeln!(w, "  ... and {hidden} more")?;
        }
    }

    writeln!(w)?;
    pretty_section(w, "Upcoming deadlines")?;
    if view.upcoming.is_empty() {
        writeln!(w, "  Nothing on your plate.")?;
    }
    for card in &view.upcoming {
        write_card_pretty(w, card)?;
    }

    writeln!(w)?;
    pretty_section(w, "Active milestones")?;
    for m in &view.milestones {
        let project = m.project_title.as_deref().unwrap_or("(no project)");
        writeln!(
            w,
            "  {:<28} {:<22} {} {:>3}%  due {}",
            m.title,
            project,
            bar(m.progress.percent, 12),
            m.progress.percent,
            short_date(m.due_date)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::{demo, rendered};

    #[test]
    fn text_lists_stats_and_cards() {
        let ws = demo("u3");
        let view = dashboard(&ws.state(), &ws.session());
        let out = rendered(|w| write_text(&view, w));
        assert!(out.starts_with("stats  in_progress=1 overdue=1 completed=2 total=5"));
        assert!(out.contains("\noverdue  t1  in-progress"));
        assert_eq!(out.matches("upcoming  ").count(), 3);
        assert!(out.contains("milestone  m1  33%  1/3"));
    }

    #[test]
    fn pretty_has_greeting_and_sections() {
        let ws = demo("u3");
        let view = dashboard(&ws.state(), &ws.session());
        let out = rendered(|w| write_pretty(&view, w));
        assert!(out.starts_with("Welcome back, Emily\n"));
        assert!(out.contains("Overdue (1)"));
        assert!(out.contains("(overdue)"));
        assert!(out.contains("Upcoming deadlines"));
        assert!(out.contains("Brand Refresh"));
    }
}
