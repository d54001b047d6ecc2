//! Shared test doubles for the pipeline — scripted collaborators and
//! context builders.
//!
//! Available only under `#[cfg(test)]`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::config::{AppConfig, EnvConfig};
use crate::context::AppContext;
use crate::domain::window::{Window, current_week};
use crate::error::{AppError, AppResult};
use crate::services::version_control::CommitDetails;
use crate::services::{LanguageModelService, NotifierService, VersionControlService};

pub fn test_config() -> AppConfig {
    let env = EnvConfig {
        gemini_api_key: Some("test-key".to_string()),
        ..EnvConfig::default()
    };
    AppConfig::from_snapshot(env, Path::new(".")).expect("test config must build")
}

pub fn test_window() -> Window {
    // 2025-01-08 is a Wednesday; the window is Jan 6 through Jan 12.
    let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
    current_week(now, chrono::FixedOffset::east_opt(0).unwrap())
}

pub fn test_context(
    config: AppConfig,
    vcs: Arc<dyn VersionControlService>,
    model: Arc<dyn LanguageModelService>,
    notifier: Arc<dyn NotifierService>,
) -> AppContext {
    AppContext::new(config, vcs, model, notifier)
}

/// Scripted version-control collaborator.
#[derive(Default)]
pub struct FakeVcs {
    pub branches: Vec<String>,
    /// branch → oldest-first commit ids inside the window.
    pub per_branch: HashMap<String, Vec<String>>,
    /// All-history union, oldest first.
    pub union: Vec<String>,
    /// id → details; ids without an entry resolve to canned metadata with
    /// no parent.
    pub details: HashMap<String, CommitDetails>,
    /// id → diff content; missing ids yield empty content.
    pub diffs: HashMap<String, String>,
    pub fail_branch_listings: Vec<String>,
    pub fail_refresh: bool,
    /// Base arguments observed by `change_content`, for baseline assertions.
    pub seen_bases: Mutex<Vec<Option<String>>>,
}

impl FakeVcs {
    pub fn with_branch(mut self, branch: &str, ids: &[&str]) -> Self {
        self.branches.push(branch.to_string());
        self.per_branch.insert(
            branch.to_string(),
            ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn with_union(mut self, ids: &[&str]) -> Self {
        self.union = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_details(mut self, id: &str, title: &str, parent: Option<&str>) -> Self {
        self.details.insert(
            id.to_string(),
            CommitDetails {
                title: title.to_string(),
                author: "Ada Lovelace".to_string(),
                parent: parent.map(str::to_string),
            },
        );
        self
    }

    pub fn with_diff(mut self, id: &str, content: &str) -> Self {
        self.diffs.insert(id.to_string(), content.to_string());
        self
    }
}

#[async_trait]
impl VersionControlService for FakeVcs {
    async fn refresh(&self) -> AppResult<()> {
        if self.fail_refresh {
            return Err(AppError::VersionControl("fetch refused".to_string()));
        }
        Ok(())
    }

    async fn remote_branches(&self) -> AppResult<Vec<String>> {
        Ok(self.branches.clone())
    }

    async fn commits_on_branch(&self, branch: &str, _window: &Window) -> AppResult<Vec<String>> {
        if self.fail_branch_listings.iter().any(|b| b == branch) {
            return Err(AppError::VersionControl(format!(
                "cannot list commits on {branch}"
            )));
        }
        Ok(self.per_branch.get(branch).cloned().unwrap_or_default())
    }

    async fn commits_in_window(&self, _window: &Window) -> AppResult<Vec<String>> {
        Ok(self.union.clone())
    }

    async fn commit_details(&self, id: &str) -> AppResult<CommitDetails> {
        Ok(self.details.get(id).cloned().unwrap_or(CommitDetails {
            title: format!("change {id}"),
            author: "Ada Lovelace".to_string(),
            parent: None,
        }))
    }

    async fn change_content(&self, base: Option<&str>, id: &str) -> AppResult<String> {
        self.seen_bases
            .lock()
            .expect("seen_bases lock")
            .push(base.map(str::to_string));
        Ok(self.diffs.get(id).cloned().unwrap_or_default())
    }
}

/// Scripted summarization collaborator. Replies are `reply-<n>` in call
/// order unless the call index is scripted to fail.
pub struct FakeModel {
    calls: AtomicUsize,
    fail_calls: Vec<usize>,
    fail_all: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn scripted() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_calls: Vec::new(),
            fail_all: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_calls(indexes: &[usize]) -> Self {
        Self {
            fail_calls: indexes.to_vec(),
            ..Self::scripted()
        }
    }

    pub fn always_failing() -> Self {
        Self {
            fail_all: true,
            ..Self::scripted()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModelService for FakeModel {
    async fn summarize(&self, prompt: &str) -> AppResult<String> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());

        if self.fail_all || self.fail_calls.contains(&index) {
            return Err(AppError::Summarization("model offline".to_string()));
        }
        Ok(format!("reply-{index}"))
    }
}

/// Records delivered payloads; optionally refuses them.
#[derive(Default)]
pub struct FakeNotifier {
    pub fail: bool,
    pub delivered: Mutex<Vec<String>>,
}

#[async_trait]
impl NotifierService for FakeNotifier {
    async fn deliver(&self, report: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Notification("webhook gone".to_string()));
        }
        self.delivered
            .lock()
            .expect("delivered lock")
            .push(report.to_string());
        Ok(())
    }
}
