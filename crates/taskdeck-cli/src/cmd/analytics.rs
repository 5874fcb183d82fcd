//! `td analytics`: whole-team breakdowns.

use std::io::{self, Write};

use taskdeck_core::derive::AnalyticsSummary;
use taskdeck_core::nav::ViewId;
use taskdeck_core::views::analytics;

use super::Workspace;
use crate::output::{bar, pretty_kv, pretty_section, render_mode};

pub fn run_analytics(ws: &Workspace) -> anyhow::Result<()> {
    let state = ws.open(ViewId::Analytics)?;
    let summary = analytics(&state, &ws.session());
    render_mode(ws.output, &summary, write_text, write_pretty)
}

fn write_text(s: &AnalyticsSummary, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "total={} completed={} rate={}% estimated={}h actual={}h efficiency={}%",
        s.total_tasks,
        s.completed_tasks,
        s.completion_rate,
        s.time.estimated_hours,
        s.time.actual_hours,
        s.time.efficiency
    )?;
    for b in &s.by_type {
        writeln!(w, "type  {}  {}  {}%", b.key, b.count, b.percent)?;
    }
    for b in &s.by_priority {
        writeln!(w, "priority  {}  {}  {}%", b.key, b.count, b.percent)?;
    }
    for m in &s.members {
        writeln!(
            w,
            "member  {}  {}/{}  {}%  {}",
            m.user_id, m.completed, m.total, m.rate, m.name
        )?;
    }
    Ok(())
}

fn write_pretty(s: &AnalyticsSummary, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Analytics")?;
    pretty_kv(w, "Tasks", s.total_tasks.to_string())?;
    pretty_kv(w, "Completed", s.completed_tasks.to_string())?;
    pretty_kv(
        w,
        "Completion",
        format!("{} {}%", bar(s.completion_rate, 20), s.completion_rate),
    )?;

    writeln!(w)?;
    pretty_section(w, "By type")?;
    for b in &s.by_type {
        writeln!(
            w,
            "  {:<14} {:>3}  {} {:>3}%",
            b.key.as_str(),
            b.count,
            bar(b.percent, 20),
            b.percent
        )?;
    }

    writeln!(w)?;
    pretty_section(w, "By priority")?;
    for b in &s.by_priority {
        writeln!(
            w,
            "  {:<14} {:>3}  {} {:>3}%",
            b.key.as_str(),
            b.count,
            bar(b.percent, 20),
            b.percent
        )?;
    }

    writeln!(w)?;
    pretty_section(w, "Team performance")?;
    for m in &s.members {
        writeln!(
            w,
            "  {:<18} {:>2}/{:<2}  {} {:>3}%",
            m.name,
            m.completed,
            m.total,
            bar(m.rate, 20),
            m.rate
        )?;
    }

    writeln!(w)?;
    pretty_section(w, "Time tracking")?;
    pretty_kv(w, "Estimated", format!("{:.1}h", s.time.estimated_hours))?;
    pretty_kv(w, "Actual", format!("{:.1}h", s.time.actual_hours))?;
    pretty_kv(w, "Efficiency", format!("{}%", s.time.efficiency))?;
    Ok(())
}
