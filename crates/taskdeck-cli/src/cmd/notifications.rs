//! `td notifications`: the session user's inbox, newest first.

use std::io::{self, Write};

use clap::Args;
use taskdeck_core::nav::ViewId;
use taskdeck_core::views::{NotificationsView, notification_list};

use super::Workspace;
use crate::output::{pretty_section, render_mode, short_date};

/// Arguments for `td notifications`.
#[derive(Args, Debug, Default, Clone)]
pub struct NotificationsArgs {
    /// Hide notifications that are already read.
    #[arg(long)]
    pub unread: bool,
}

pub fn run_notifications(args: &NotificationsArgs, ws: &Workspace) -> anyhow::Result<()> {
    let state = ws.open(ViewId::Notifications)?;
    let mut view = notification_list(&state, &ws.session());
    if args.unread {
        view.items.retain(|n| !n.read);
    }
    render_mode(ws.output, &view, write_text, write_pretty)
}

fn write_text(view: &NotificationsView, w: &mut dyn Write) -> io::Result<()> {
    for n in &view.items {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            n.id,
            if n.read { "read" } else { "unread" },
            n.kind,
            n.created_at.format("%Y-%m-%dT%H:%M:%SZ"),
            n.message
        )?;
    }
    Ok(())
}

fn write_pretty(view: &NotificationsView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Notifications: {}", view.summary))?;
    if view.items.is_empty() {
        writeln!(w, "  No notifications.")?;
    }
    for n in &view.items {
        let dot = if n.read { ' ' } else { '*' };
        writeln!(w, "{dot} {:<5} {}", n.id, n.message)?;
        let mut meta = format!("        {} | {}", n.kind, short_date(n.created_at));
        if let Some(title) = &n.task_title {
            meta.push_str(" | ");
            meta.push_str(title);
        }
        writeln!(w, "{meta}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::{demo, rendered};

    #[test]
    fn text_marks_read_state() {
        let ws = demo("u3");
        let view = notification_list(&ws.state(), &ws.session());
        let out = rendered(|w| write_text(&view, w));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("n1  unread  "));
        assert!(lines[2].starts_with("n3  read  "));
    }

    #[test]
    fn pretty_uses_summary_line() {
        let ws = demo("u3");
        let state = ws.state().mark_all_read();
        let view = notification_list(&state, &ws.session());
        let out = rendered(|w| write_pretty(&view, w));
        assert!(out.starts_with("Notifications: All caught up!\n"));
        assert!(!out.contains("\n* "));
    }
}
