//! `td fixture`: dump the active dataset.
//!
//! The dump is always JSON so it can be edited and fed back through
//! `--fixture`. Pretty output adds a short header on stderr naming the
//! source.

use std::io::{self, Write};

use taskdeck_core::fixture::Fixture;

use super::Workspace;

pub fn run_fixture(ws: &Workspace) -> anyhow::Result<()> {
    if ws.output.is_pretty() {
        eprintln!(
            "# source: {}  users: {}  tasks: {}",
            ws.source.describe(),
            ws.fixture.users.len(),
            ws.fixture.tasks.len()
        );
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_fixture(&session_fixture(ws), &mut out)
}

/// The loaded dataset with `currentUser` pinned to the session user, so the
/// dump reopens as the same person.
fn session_fixture(ws: &Workspace) -> Fixture {
    Fixture {
        current_user: Some(ws.user.id.clone()),
        ..ws.fixture.clone()
    }
}

fn write_fixture(fixture: &Fixture, out: &mut dyn Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, fixture)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::demo;
    use taskdeck_core::fixture::FixtureFormat;

    #[test]
    fn dump_reloads_as_the_same_user() {
        let ws = demo("u4");
        let mut buf = Vec::new();
        write_fixture(&session_fixture(&ws), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let reloaded = Fixture::parse(&text, FixtureFormat::Json, "dump").unwrap();
        assert_eq!(reloaded.resolve_user(None).unwrap().id, "u4");
        assert_eq!(reloaded.tasks, ws.fixture.tasks);
        assert_eq!(reloaded.milestones.len(), 5);
    }
}
