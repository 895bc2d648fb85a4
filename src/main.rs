// Entrypoint for the `exsubmit` command.
// - Keeps `main` small: parse arguments, load configuration, run the submit
//   pipeline with the HTTP client, print the result.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use exsubmit_cli::{api::ApiClient, config::Config, submit, ui};

#[derive(Parser, Debug)]
#[command(name = "exsubmit")]
#[command(about = "Submit your solution to an exercise", long_about = None)]
struct Cli {
    /// Files to submit, relative to the current directory or absolute.
    #[arg(required = true)]
    files: Vec<String>,

    /// Use this workspace root instead of the configured one.
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Show debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = Config::load()?.with_workspace_override(cli.workspace);
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    // Configuration is checked before the client is built or any path is
    // resolved, so an unconfigured tool fails with the friendly message.
    config.ensure_configured()?;
    let api = ApiClient::from_config(&config)?;

    let uploader = ui::WithSpinner::new(&api);
    let (package, response) = submit::run(&config, &cli.files, &cwd, &uploader)?;
    println!("{}", ui::summary(&package, &response));
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("EXSUBMIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
