#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use cmd::{GlobalArgs, Workspace};
use output::{CliError, OutputMode, render_error};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use taskdeck_core::error::ErrorCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "td",
    author,
    version,
    about = "taskdeck: team task board, workload and milestones in the terminal",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty (TTY default), text (pipe default), or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Open the session as this user id (overrides TASKDECK_USER and config).
    #[arg(long, global = true)]
    user: Option<String>,

    /// Load the dataset from a .json, .toml or .yaml file instead of the demo.
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Pin the clock (RFC 3339) for overdue and due-soon math.
    #[arg(long, global = true, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn globals(&self) -> GlobalArgs {
        GlobalArgs {
            format: self.format,
            json: self.json,
            user: self.user.clone(),
            fixture: self.fixture.clone(),
            now: self.now,
        }
    }
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Screens",
        about = "Greeting, stat tiles, overdue and upcoming work",
        long_about = "Show the dashboard for the session user: task counts, overdue preview, upcoming deadlines and active milestones.",
        after_help = "EXAMPLES:\n    # Your dashboard\n    td dashboard\n\n    # As another user, machine-readable\n    td dashboard --user u2 --format json"
    )]
    Dashboard,

    #[command(
        next_help_heading = "Screens",
        about = "Your task board, grouped by status",
        long_about = "Show the session user's tasks in four status columns. Filters combine; `all` clears one.",
        after_help = "EXAMPLES:\n    # Everything assigned to you\n    td tasks\n\n    # Only urgent design work still in review\n    td tasks --status review --priority urgent --type design"
    )]
    Tasks(cmd::tasks::TasksArgs),

    #[command(
        next_help_heading = "Screens",
        about = "Team workload, overdue work and active projects",
        after_help = "EXAMPLES:\n    td team\n    td team --format text | grep '^attention'"
    )]
    Team,

    #[command(
        next_help_heading = "Screens",
        about = "Completion, type and priority breakdowns, time tracking",
        after_help = "EXAMPLES:\n    td analytics\n    td analytics --json"
    )]
    Analytics,

    #[command(
        next_help_heading = "Screens",
        about = "Projects, milestones and their tasks",
        after_help = "EXAMPLES:\n    td projects\n    td projects --user u6"
    )]
    Projects,

    #[command(
        next_help_heading = "Screens",
        about = "Your notifications, newest first",
        after_help = "EXAMPLES:\n    td notifications\n    td notifications --unread"
    )]
    Notifications(cmd::notifications::NotificationsArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Show one task in full",
        long_about = "Show a task's detail: people, hours, subtasks, attachments and, when your role allows, internal notes.",
        after_help = "EXAMPLES:\n    td show t7\n    td show t7 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "The menu your role is offered",
        after_help = "EXAMPLES:\n    td menu\n    td menu --user u6"
    )]
    Menu,

    #[command(
        next_help_heading = "Inspect",
        about = "Dump the active dataset as JSON",
        long_about = "Write the loaded dataset as JSON. Edit it and load it back with --fixture.",
        after_help = "EXAMPLES:\n    td fixture > team.json\n    td --fixture team.json dashboard"
    )]
    Fixture,

    #[command(
        next_help_heading = "Interactive",
        about = "Full-screen terminal dashboard",
        after_help = "KEYS:\n    Tab/1-9  switch screen     j/k  move     Enter  open task\n    s  next status     space  toggle subtask     r/a  mark read/all\n    f/p/t  cycle filters     c  clear filters     Esc  close     q  quit"
    )]
    Ui,

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    td completions bash > ~/.local/share/bash-completion/completions/td\n    td completions zsh > ~/.zfunc/_td"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKDECK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "taskdeck=debug,info"
        } else {
            "taskdeck=info,warn"
        })
    });

    let format = env::var("TASKDECK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn fail(mode: OutputMode, error: &CliError) -> ExitCode {
    if let Err(render_err) = render_error(mode, error) {
        eprintln!("error: {} ({render_err})", error.message);
    }
    ExitCode::FAILURE
}

fn dispatch(command: &Commands, ws: &Workspace) -> anyhow::Result<()> {
    match command {
        Commands::Dashboard => cmd::dashboard::run_dashboard(ws),
        Commands::Tasks(args) => cmd::tasks::run_tasks(args, ws),
        Commands::Team => cmd::team::run_team(ws),
        Commands::Analytics => cmd::analytics::run_analytics(ws),
        Commands::Projects => cmd::projects::run_projects(ws),
        Commands::Notifications(args) => cmd::notifications::run_notifications(args, ws),
        Commands::Show(args) => cmd::show::run_show(args, ws),
        Commands::Menu => cmd::menu::run_menu(ws),
        Commands::Fixture => cmd::fixture::run_fixture(ws),
        Commands::Ui => tui::run(ws),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }
    let early_mode = output::resolve_output_mode(cli.format, cli.json);

    let project_root = match env::current_dir() {
        Ok(root) => root,
        Err(err) => {
            return fail(
                early_mode,
                &CliError::with_code(
                    format!("cannot read current directory: {err}"),
                    ErrorCode::InternalUnexpected,
                ),
            );
        }
    };

    let ws = match Workspace::load(&cli.globals(), &project_root) {
        Ok(ws) => ws,
        Err(err) => {
            return fail(
                early_mode,
                &CliError::from_anyhow(&err, ErrorCode::ConfigParseError),
            );
        }
    };

    debug!(command = ?cli.command, "dispatching");
    match dispatch(&cli.command, &ws) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let fallback = if matches!(cli.command, Commands::Ui) {
                ErrorCode::TerminalUnavailable
            } else {
                ErrorCode::InternalUnexpected
            };
            fail(ws.output, &CliError::from_anyhow(&err, fallback))
        }
    }
}
