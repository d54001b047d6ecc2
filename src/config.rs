use std::env;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};

use crate::error::{AppError, AppResult};

pub const ENV_GEMINI_API_KEY: &str = "WRAPUP_GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "WRAPUP_GEMINI_MODEL";
pub const ENV_LLM_PROVIDER: &str = "WRAPUP_LLM_PROVIDER";
pub const ENV_SLACK_WEBHOOK_URL: &str = "WRAPUP_SLACK_WEBHOOK_URL";
pub const ENV_REPO_URL: &str = "WRAPUP_REPO_URL";
pub const ENV_BRANCH_COMMIT_CAP: &str = "WRAPUP_BRANCH_COMMIT_CAP";
pub const ENV_MAX_CHUNK_CHARS: &str = "WRAPUP_MAX_CHUNK_CHARS";
pub const ENV_UTC_OFFSET: &str = "WRAPUP_UTC_OFFSET";
pub const ENV_EXCLUDE_PATHS: &str = "WRAPUP_EXCLUDE_PATHS";

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BRANCH_COMMIT_CAP: usize = 50;
const DEFAULT_MAX_CHUNK_CHARS: usize = 12_000;

/// Paths stripped from every commit diff before chunking: lockfiles, build
/// output, and minified bundles carry no reviewable signal.
const DEFAULT_EXCLUDE_PATHS: &[&str] = &[
    "*.lock",
    "package-lock.json",
    "*.min.js",
    "*.min.css",
    "dist/*",
    "build/*",
    "target/*",
    "node_modules/*",
];

/// Raw environment snapshot, read once at process entry. Every field is
/// optional here; `AppConfig::from_snapshot` decides what is fatal.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub llm_provider: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub repo_url: Option<String>,
    pub branch_commit_cap: Option<String>,
    pub max_chunk_chars: Option<String>,
    pub utc_offset: Option<String>,
    pub exclude_paths: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: read_env(ENV_GEMINI_API_KEY),
            gemini_model: read_env(ENV_GEMINI_MODEL),
            llm_provider: read_env(ENV_LLM_PROVIDER),
            slack_webhook_url: read_env(ENV_SLACK_WEBHOOK_URL),
            repo_url: read_env(ENV_REPO_URL),
            branch_commit_cap: read_env(ENV_BRANCH_COMMIT_CAP),
            max_chunk_chars: read_env(ENV_MAX_CHUNK_CHARS),
            utc_offset: read_env(ENV_UTC_OFFSET),
            exclude_paths: read_env(ENV_EXCLUDE_PATHS),
        }
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub llm_provider: LlmProvider,
    pub slack_webhook_url: Option<String>,
    pub repo_url: Option<String>,
    pub branch_commit_cap: usize,
    pub max_chunk_chars: usize,
    pub utc_offset: FixedOffset,
    pub exclude_paths: Vec<String>,
    pub workspace_root: PathBuf,
}

#[derive(Debug, Clone)]
pub enum LlmProvider {
    Gemini,
    Custom(String),
}

impl AppConfig {
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        Self::from_snapshot(EnvConfig::from_env(), workspace_hint)
    }

    /// Validate the raw snapshot into the immutable runtime configuration.
    /// The summarization credential is the only mandatory entry; its absence
    /// is fatal before any pipeline work starts.
    pub fn from_snapshot(env: EnvConfig, workspace_hint: &Path) -> AppResult<Self> {
        let gemini_api_key = env
            .gemini_api_key
            .ok_or_else(|| AppError::Configuration(format!("{ENV_GEMINI_API_KEY} is not set")))?;

        let llm_provider = env
            .llm_provider
            .map(|provider| match provider.to_lowercase().as_str() {
                "gemini" => LlmProvider::Gemini,
                other => LlmProvider::Custom(other.to_string()),
            })
            .unwrap_or(LlmProvider::Gemini);

        let branch_commit_cap = parse_count(
            env.branch_commit_cap.as_deref(),
            ENV_BRANCH_COMMIT_CAP,
            DEFAULT_BRANCH_COMMIT_CAP,
        )?;
        let max_chunk_chars = parse_count(
            env.max_chunk_chars.as_deref(),
            ENV_MAX_CHUNK_CHARS,
            DEFAULT_MAX_CHUNK_CHARS,
        )?;

        let utc_offset = match env.utc_offset.as_deref() {
            Some(raw) => parse_utc_offset(raw)?,
            None => Utc.fix(),
        };

        let exclude_paths = match env.exclude_paths.as_deref() {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|glob| !glob.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_EXCLUDE_PATHS
                .iter()
                .map(|glob| glob.to_string())
                .collect(),
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: env
                .gemini_model
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            llm_provider,
            slack_webhook_url: env.slack_webhook_url,
            repo_url: env
                .repo_url
                .map(|url| url.trim_end_matches('/').to_string()),
            branch_commit_cap,
            max_chunk_chars,
            utc_offset,
            exclude_paths,
            workspace_root: workspace_hint.to_path_buf(),
        })
    }
}

fn parse_count(raw: Option<&str>, key: &str, default: usize) -> AppResult<usize> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value = raw.parse::<usize>().map_err(|_| {
        AppError::Configuration(format!("{key} must be a positive integer, got '{raw}'"))
    })?;
    if value == 0 {
        return Err(AppError::Configuration(format!("{key} must not be zero")));
    }
    Ok(value)
}

/// Parse a fixed zone given as `+HH:MM` / `-HH:MM` (or `UTC`/`Z`).
pub fn parse_utc_offset(raw: &str) -> AppResult<FixedOffset> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("utc") || value == "Z" {
        return Ok(Utc.fix());
    }

    let invalid =
        || AppError::Configuration(format!("{ENV_UTC_OFFSET} must look like +02:00, got '{raw}'"));

    let (sign, rest) = if let Some(rest) = value.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = value.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
