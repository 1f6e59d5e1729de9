use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, Args, Parser, Subcommand};

use golden_runner::environment::EditorHelper;
use golden_runner::helper::append_line;
use golden_runner::logging::init_logging;
use golden_runner::{RunnerConfig, Suite, SuiteError, SuiteLayout, ToolCommand};
use golden_vcs::Git;

#[derive(Parser)]
#[command(
    name = "golden-run",
    about = "Golden-file regression tests for a history-rewriting git tool",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More diagnostics on stderr (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors on stderr
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run every test case under <root>/tests
    Run(RunArgs),

    /// Append a line to a file (editor used by the tool under test)
    #[command(hide = true)]
    AppendLine {
        #[arg(allow_hyphen_values = true)]
        line: String,
        file: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Suite root containing tests/, repos/ and patches/
    #[arg(long, env = "GOLDEN_ROOT", default_value = ".")]
    root: PathBuf,

    /// Tool under test
    #[arg(long, env = "GOLDEN_TOOL")]
    tool: OsString,

    /// Argument placed before the case's subcommand (repeatable)
    #[arg(long = "tool-arg", allow_hyphen_values = true)]
    tool_args: Vec<OsString>,

    /// Git executable
    #[arg(long, env = "GOLDEN_GIT", default_value = "git")]
    git: OsString,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(128),
            }
        }
    };

    let code = match cli.command {
        // Runs inside the tool under test; stays silent so nothing leaks into
        // captured output.
        Command::AppendLine { line, file } => match append_line(&file, &line) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("fatal: cannot append to '{}': {e}", file.display());
                128
            }
        },
        Command::Run(args) => {
            init_logging(cli.verbose, cli.quiet);
            match run(args) {
                Ok(()) => 0,
                Err(e) => report_failure(&e),
            }
        }
    };
    process::exit(code);
}

fn run(args: RunArgs) -> Result<()> {
    let exe = std::env::current_exe().context("cannot locate the runner executable")?;
    let config = RunnerConfig::new(
        SuiteLayout::new(&args.root)?,
        ToolCommand::new(args.tool).with_args(args.tool_args).resolve()?,
        Git::new(args.git),
        EditorHelper::new(exe)?,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = Suite::new(&config).run(&mut out)?;
    tracing::info!(passed = report.cases.len(), "suite finished");
    Ok(())
}

/// Print the failure and pick the exit code: 1 for a snapshot mismatch,
/// 128 for anything else.
fn report_failure(err: &anyhow::Error) -> i32 {
    if let Some((case, label, diff)) = err.downcast_ref::<SuiteError>().and_then(SuiteError::mismatch)
    {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "Test \"{case}\" failed: {label} does not match expected output.");
        let _ = writeln!(out);
        let _ = out.write_all(diff);
        let _ = writeln!(out);
        let _ = out.flush();
        return 1;
    }
    eprintln!("fatal: {err}");
    128
}
