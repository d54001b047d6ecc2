mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
#[cfg(test)]
mod test_helpers;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::report;
use crate::config::{AppConfig, LlmProvider};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::llm::GeminiClient;
use crate::infra::slack::{SlackWebhook, StdoutNotifier};
use crate::services::{LanguageModelService, NotifierService};
use crate::workflow::report::ReportOutcome;

#[derive(Parser)]
#[command(name = "wrapup", author, version, about = "Weekly git activity digest")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the current week's commits and deliver the report.
    Report(ReportArgs),
    /// Inspect CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Repository to report on; defaults to the current directory.
    #[arg(short, long)]
    repo: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Report(args) => run_report(args).await,
    }
}

async fn run_report(args: ReportArgs) -> AppResult<()> {
    let workspace = match args.repo {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    // Fatal-config surfaces here, before any pipeline work.
    let config = AppConfig::load(&workspace)?;

    let language_model: Arc<dyn LanguageModelService> = match &config.llm_provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        )),
        LlmProvider::Custom(provider) => {
            eprintln!(
                "Warning: custom LLM provider '{provider}' not yet implemented, using Gemini fallback."
            );
            Arc::new(GeminiClient::new(
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
            ))
        }
    };

    let notifier: Arc<dyn NotifierService> = match &config.slack_webhook_url {
        Some(url) => Arc::new(SlackWebhook::new(url.clone())),
        None => {
            eprintln!("Warning: Slack webhook not configured; the report will be printed instead.");
            Arc::new(StdoutNotifier)
        }
    };

    let git = Arc::new(GitCli::new(
        config.workspace_root.clone(),
        config.exclude_paths.clone(),
    ));

    let context = AppContext::new(config, git, language_model, notifier);

    match report::run(&context).await? {
        ReportOutcome::Empty { window } => {
            println!("No commits in the week of {}; nothing to report.", window.label);
        }
        ReportOutcome::Delivered { window, commits } => {
            println!("Report for {} delivered ({commits} commits).", window.label);
        }
    }

    Ok(())
}
