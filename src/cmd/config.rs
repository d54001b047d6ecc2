use clap::{Args, Subcommand};

use crate::config::{
    ENV_BRANCH_COMMIT_CAP, ENV_EXCLUDE_PATHS, ENV_GEMINI_API_KEY, ENV_GEMINI_MODEL,
    ENV_LLM_PROVIDER, ENV_MAX_CHUNK_CHARS, ENV_REPO_URL, ENV_SLACK_WEBHOOK_URL, ENV_UTC_OFFSET,
    EnvConfig,
};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the configuration read from the environment (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let env = EnvConfig::from_env();

    println!("Configuration is read from WRAPUP_* environment variables.");
    println!(
        "{ENV_GEMINI_API_KEY} (required): {}",
        mask_secret(&env.gemini_api_key)
    );
    println!("{ENV_GEMINI_MODEL}: {}", display_value(&env.gemini_model));
    println!("{ENV_LLM_PROVIDER}: {}", display_value(&env.llm_provider));
    println!(
        "{ENV_SLACK_WEBHOOK_URL}: {}",
        mask_secret(&env.slack_webhook_url)
    );
    println!("{ENV_REPO_URL}: {}", display_value(&env.repo_url));
    println!(
        "{ENV_BRANCH_COMMIT_CAP}: {}",
        display_value(&env.branch_commit_cap)
    );
    println!(
        "{ENV_MAX_CHUNK_CHARS}: {}",
        display_value(&env.max_chunk_chars)
    );
    println!("{ENV_UTC_OFFSET}: {}", display_value(&env.utc_offset));
    println!("{ENV_EXCLUDE_PATHS}: {}", display_value(&env.exclude_paths));

    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(token) if !token.is_empty() => {
            // Count and slice on chars: env text is arbitrary and byte
            // indexing would panic inside a multibyte sequence.
            let chars: Vec<char> = token.chars().collect();
            if chars.len() > 6 {
                let prefix: String = chars[..3].iter().collect();
                let suffix: String = chars[chars.len() - 3..].iter().collect();
                format!("{prefix}***{suffix}")
            } else {
                "***".to_string()
            }
        }
        _ => "<not set>".to_string(),
    }
}
