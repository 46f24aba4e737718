//! Main CLI application

use crate::config::{LauncherSettings, Locator, SearchReport, CALLER_DIR_ENV, RUNNER_BIN_ENV};
use crate::error::is_not_found;
use crate::registry::Registry;
use crate::runner::InterruptFlag;
use crate::session::{Session, TaskfileLauncher};
use crate::ui::{stdio_prompter, Console, TerminalConsole, Verbosity};
use anyhow::Context as _;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Build the `lata` command
pub fn build_command() -> Command {
    with_common_args(
        Command::new("lata")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Pick a task from a Taskfile and run it")
            .arg(
                Arg::new("taskfile")
                    .value_name("TASKFILE")
                    .value_parser(value_parser!(PathBuf))
                    .help("Path to a Taskfile; skips discovery"),
            )
            .arg(
                Arg::new("info")
                    .short('i')
                    .long("info")
                    .alias("search-info")
                    .help("Show where the Taskfile is searched for, then exit")
                    .action(ArgAction::SetTrue),
            ),
    )
}

/// Build the command for a registry launcher
pub fn build_registry_command(name: &'static str, about: &str) -> Command {
    with_common_args(
        Command::new(name)
            .version(env!("CARGO_PKG_VERSION"))
            .about(about.to_string()),
    )
}

fn with_common_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print the menu, prompts and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .value_parser(value_parser!(Shell))
                .help("Print a shell completion script, then exit"),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Print a completion script if one was requested
fn print_completions(matches: &ArgMatches, command: &mut Command) -> bool {
    match matches.get_one::<Shell>("completions") {
        Some(shell) => {
            let name = command.get_name().to_string();
            clap_complete::generate(*shell, command, name, &mut io::stdout());
            true
        }
        None => false,
    }
}

/// Run the `lata` CLI with the process arguments
pub fn run() -> anyhow::Result<i32> {
    run_from(std::env::args_os())
}

/// Run the `lata` CLI with explicit arguments
pub fn run_from<I, T>(args: I) -> anyhow::Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    // A missing .env file is normal
    dotenvy::dotenv().ok();

    let mut command = build_command();
    let matches = command.clone().get_matches_from(args);

    if print_completions(&matches, &mut command) {
        return Ok(0);
    }

    let console = TerminalConsole::new(get_verbosity(&matches));
    let explicit = matches.get_one::<PathBuf>("taskfile").cloned();

    if matches.get_flag("info") {
        let settings = LauncherSettings::from_env();
        let locator = Locator::from_env(explicit, &settings);
        print_search_info(&locator.report(), &settings, &console);
        return Ok(0);
    }

    launch_with(explicit, &console)
}

/// Run the Taskfile launcher without parsing arguments. `path` skips
/// discovery, as the positional argument does.
pub fn launch(path: Option<PathBuf>) -> anyhow::Result<i32> {
    dotenvy::dotenv().ok();
    launch_with(path, &TerminalConsole::default())
}

fn launch_with(explicit: Option<PathBuf>, console: &TerminalConsole) -> anyhow::Result<i32> {
    let settings = LauncherSettings::from_env();
    let path = Locator::from_env(explicit, &settings).resolve();
    console.info(&format!("Using Taskfile: {}", display_absolute(&path)));
    console.debug(&format!("Runner: {}", settings.runner));

    let interrupt = InterruptFlag::new();
    let launcher = match TaskfileLauncher::open(&path, &settings, interrupt.clone()) {
        Ok(launcher) => launcher,
        Err(e) => {
            console.error(&e.to_string());
            if is_not_found(&e) {
                console.warn("Run with --info to see every location that was searched");
            }
            return Ok(1);
        }
    };
    interrupt
        .listen()
        .context("failed to install the Ctrl+C handler")?;

    let mut prompter = stdio_prompter();
    Ok(Session::new(&launcher, prompter.as_mut(), console).run())
}

/// Run a registry launcher with the process arguments
pub fn run_registry(name: &'static str, registry: Registry) -> anyhow::Result<i32> {
    dotenvy::dotenv().ok();

    let mut command = build_registry_command(name, registry.title());
    let matches = command.clone().get_matches();

    if print_completions(&matches, &mut command) {
        return Ok(0);
    }

    let console = TerminalConsole::new(get_verbosity(&matches));
    let interrupt = InterruptFlag::install().context("failed to install the Ctrl+C handler")?;
    let registry = registry.with_interrupt(interrupt);

    let mut prompter = stdio_prompter();
    Ok(Session::new(&registry, prompter.as_mut(), &console).run())
}

/// Print every search candidate in priority order
pub fn print_search_info(
    report: &SearchReport,
    settings: &LauncherSettings,
    console: &dyn Console,
) {
    console.heading("Taskfile search order");

    match &settings.caller_dir {
        Some(dir) => console.plain(&format!("{} = {}", CALLER_DIR_ENV, dir.display())),
        None => console.plain(&format!("{} is not set", CALLER_DIR_ENV)),
    }
    console.plain(&format!("{} = {}", RUNNER_BIN_ENV, settings.runner));
    console.plain("");

    for (index, candidate) in report.candidates.iter().enumerate() {
        let pointer = if report.selected == Some(index) { "->" } else { "  " };
        let mark = if candidate.exists { "found" } else { "-" };
        console.plain(&format!(
            "{} {:>2}. [{:^5}] {} ({})",
            pointer,
            index + 1,
            mark,
            candidate.path.display(),
            candidate.origin
        ));
    }

    console.plain("");
    match report.selected {
        Some(_) => console.success(&format!("Selected: {}", report.resolved.display())),
        None => console.warn(&format!(
            "No Taskfile found; would use {}",
            report.resolved.display()
        )),
    }
}

fn display_absolute(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
