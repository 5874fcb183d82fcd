//! `td ui`: full-screen terminal dashboard.
//!
//! The loop is draw, poll, translate keys into intents, dispatch. All state
//! lives in [`app::App`]; [`render`] only reads it.

pub mod app;
mod render;

use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::bail;
use chrono::Utc;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use tracing::info;

use crate::cmd::Workspace;
use app::App;

const TICK: Duration = Duration::from_millis(250);

/// Run the dashboard until the user quits. The terminal is restored on
/// every exit path.
pub fn run(ws: &Workspace) -> anyhow::Result<()> {
    if !io::stdout().is_terminal() {
        bail!("`td ui` needs an interactive terminal; use the report commands when piping");
    }
    info!(user = %ws.user.id, "starting terminal dashboard");

    let mut terminal = ratatui::try_init()?;
    let mut app = App::new(ws);
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App<'_>) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| render::draw(frame, app))?;
        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            for intent in app.handle_key(key) {
                app.dispatch(&intent, Utc::now());
            }
        }
    }
    Ok(())
}
