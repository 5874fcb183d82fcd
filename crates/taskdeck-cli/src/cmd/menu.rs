//! `td menu`: the sidebar the session role is offered.

use std::io::{self, Write};

use taskdeck_core::nav::{Sidebar, sidebar};

use super::Workspace;
use crate::output::{pretty_kv, pretty_section, render_mode};

pub fn run_menu(ws: &Workspace) -> anyhow::Result<()> {
    let state = ws.state();
    let menu = sidebar(&ws.user, state.active_view(), state.unread_count());
    render_mode(ws.output, &menu, write_text, write_pretty)
}

fn write_text(menu: &Sidebar, w: &mut dyn Write) -> io::Result<()> {
    for item in &menu.items {
        let active = if item.active { "*" } else { "-" };
        match item.badge {
            Some(n) => writeln!(w, "{}  {active}  {}", item.view, n)?,
            None => writeln!(w, "{}  {active}", item.view)?,
        }
    }
    Ok(())
}

fn write_pretty(menu: &Sidebar, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("{} ({})", menu.user_name, menu.initials))?;
    pretty_kv(w, "Role", menu.role.as_str())?;
    if let Some(dept) = &menu.department {
        pretty_kv(w, "Department", dept)?;
    }
    writeln!(w)?;
    for item in &menu.items {
        let marker = if item.active { '>' } else { ' ' };
        match item.badge {
            Some(n) => writeln!(w, "{marker} {:<16} ({n})", item.label)?,
            None => writeln!(w, "{marker} {}", item.label)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::{demo, rendered};

    fn menu_for(user_id: &str) -> Sidebar {
        let ws = demo(user_id);
        let state = ws.state();
        sidebar(&ws.user, state.active_view(), state.unread_count())
    }

    #[test]
    fn employee_menu_marks_dashboard_and_badge() {
        let out = rendered(|w| write_text(&menu_for("u3"), w));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            ["dashboard  *", "tasks  -", "notifications  -  2", "settings  -"]
        );
    }

    #[test]
    fn viewer_lands_on_project_view() {
        let out = rendered(|w| write_pretty(&menu_for("u6"), w));
        assert!(out.starts_with("Alex Morgan (AM)\n"));
        assert!(out.contains("> Project View"));
        assert!(!out.contains("Team Overview"));
    }
}
