//! `td completions <shell>`.

use std::io::Write;

use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `td completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the completion script for.
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run_completions(shell: Shell, command: &mut clap::Command) -> anyhow::Result<()> {
    write_completions(shell, command, &mut std::io::stdout())
}

fn write_completions(
    shell: Shell,
    command: &mut clap::Command,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    generate(shell, command, "td", out);
    out.flush()?;
    Ok(())
}
