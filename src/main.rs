mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::publish::{self, PublishCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::dry_run::DryRunGit;
use crate::infra::git::GitCli;
use crate::services::VersionControlService;

#[derive(Parser)]
#[command(
    name = "dualpush",
    author,
    version,
    about = "Stage, commit and push the current repository to Gitee and GitHub"
)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit all changes and push them to both remotes (the default).
    Publish(PublishArgs),
    /// Manage remote URLs and the target branch.
    Config(ConfigArgs),
}

#[derive(Args, Default)]
struct PublishArgs {
    /// Commit message; skips the interactive prompt. Blank means auto message.
    #[arg(short, long)]
    message: Option<String>,
    /// Exit without waiting for Enter once done.
    #[arg(long)]
    no_pause: bool,
    /// Print the git commands instead of running them.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

async fn run(cli: Cli) -> AppResult<()> {
    match cli.command.unwrap_or(Commands::Publish(PublishArgs::default())) {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Publish(args) => run_publish(args).await,
    }
}

async fn run_publish(args: PublishArgs) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd)?;

    let version_control: Arc<dyn VersionControlService> = if args.dry_run {
        Arc::new(DryRunGit::new(config.workspace_root.clone()))
    } else {
        Arc::new(GitCli::new(config.workspace_root.clone()))
    };
    let context = AppContext::new(config, version_control);

    let report = publish::run(
        &context,
        PublishCommandArgs {
            message: args.message,
            pause: !args.no_pause,
        },
        &mut std::io::stdin().lock(),
        &mut std::io::stdout(),
    )
    .await?;

    if let Some(summary) = report.failure_summary() {
        warn!("publish finished: {summary}");
    }

    Ok(())
}
