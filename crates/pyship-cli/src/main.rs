use atty::Stream;
use clap::{ArgAction, Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use pyship_core::{
    build_package, clean_workspace, release_package, to_json_response, upload_package,
    CommandContext, CommandStatus, ExecutionOutcome, Registry, ReleaseRequest,
};
use serde_json::Value;

mod style;

use style::Style;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = PyshipCli::parse();
    init_tracing(cli.trace, cli.verbose);

    let ctx = CommandContext::from_env().map_err(|err| eyre!("{err:?}"))?;
    let outcome = run_command(&ctx, &cli).map_err(|err| eyre!("{err:?}"))?;
    let code = emit_output(&cli, &outcome)?;

    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

fn run_command(ctx: &CommandContext, cli: &PyshipCli) -> anyhow::Result<ExecutionOutcome> {
    match &cli.command {
        None => release_package(ctx, &ReleaseRequest { test_mode: cli.test }),
        Some(StageCommand::Clean) => clean_workspace(ctx.cwd()),
        Some(StageCommand::Build) => build_package(ctx),
        Some(StageCommand::Upload) => upload_package(ctx, &Registry::select(cli.test)),
    }
}

fn init_tracing(trace: bool, verbose: u8) {
    let level = if trace {
        "trace"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "trace",
        }
    };

    let filter = format!("pyship={level},pyship_core={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn emit_output(cli: &PyshipCli, outcome: &ExecutionOutcome) -> Result<i32> {
    let code = exit_code(outcome);
    let style = Style::new(cli.no_color, atty::is(Stream::Stdout));

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&to_json_response(outcome, code))?
        );
        return Ok(code);
    }

    if !cli.quiet {
        println!("{}", style.status(&outcome.status, &outcome.message));
        replay_captured_stderr(&outcome.details);
        if let Some(hint) = detail_str(&outcome.details, "hint") {
            let hint_line = format!("Hint: {hint}");
            println!("{}", style.info(&hint_line));
        }
    } else if outcome.status != CommandStatus::Ok {
        eprintln!("{}", outcome.message);
        replay_captured_stderr(&outcome.details);
    }

    Ok(code)
}

/// Prints stderr captured from a failed subprocess, e.g. the build
/// backend's own diagnostics.
fn replay_captured_stderr(details: &Value) {
    if let Some(stderr) = detail_str(details, "stderr") {
        if !stderr.trim().is_empty() {
            eprint!("{stderr}");
            if !stderr.ends_with('\n') {
                eprintln!();
            }
        }
    }
}

fn detail_str<'a>(details: &'a Value, key: &str) -> Option<&'a str> {
    details
        .as_object()
        .and_then(|map| map.get(key))
        .and_then(Value::as_str)
}

/// Maps outcome status to the process exit code: success is 0, user
/// errors are 1, and failures propagate the subprocess's own nonzero
/// code when one was recorded.
fn exit_code(outcome: &ExecutionOutcome) -> i32 {
    match outcome.status {
        CommandStatus::Ok => 0,
        CommandStatus::UserError => 1,
        CommandStatus::Failure => outcome
            .details
            .get("code")
            .and_then(Value::as_i64)
            .and_then(|code| i32::try_from(code).ok())
            .filter(|code| *code != 0)
            .unwrap_or(1),
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Clean, build, and upload a Python package",
    long_about = "Removes stale build output, builds sdist/wheel artifacts with `python -m build`, and uploads them to PyPI (or TestPyPI) with twine.",
    after_help = "Examples:\n  pyship\n  pyship --test\n  pyship clean\n  pyship upload --test\n"
)]
struct PyshipCli {
    #[arg(long, global = true, help = "Target TestPyPI instead of PyPI")]
    test: bool,
    #[arg(
        short,
        long,
        global = true,
        help = "Suppress human output (errors still print to stderr)"
    )]
    quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches trace)")]
    verbose: u8,
    #[arg(long, global = true, help = "Force trace logging regardless of -v/-q")]
    trace: bool,
    #[arg(
        long,
        global = true,
        help = "Emit {status,message,details} JSON envelopes"
    )]
    json: bool,
    #[arg(long, global = true, help = "Disable colored human output")]
    no_color: bool,
    #[command(subcommand)]
    command: Option<StageCommand>,
}

#[derive(Subcommand, Debug)]
enum StageCommand {
    #[command(
        about = "Remove build/, dist/, and *.egg-info directories.",
        after_help = "Example:\n  pyship clean\n"
    )]
    Clean,
    #[command(
        about = "Build sdist and wheel artifacts via `python -m build`.",
        after_help = "Example:\n  pyship build\n"
    )]
    Build,
    #[command(
        about = "Upload dist/ artifacts with twine (honors --test).",
        override_usage = "pyship upload [--test]",
        after_help = "Examples:\n  pyship upload\n  pyship upload --test\n"
    )]
    Upload,
}
