use async_trait::async_trait;

use crate::domain::window::Window;
use crate::error::AppResult;

/// Metadata resolved for a single commit id. `parent` is absent for root
/// commits, which diff against the empty baseline.
#[derive(Debug, Clone)]
pub struct CommitDetails {
    pub title: String,
    pub author: String,
    pub parent: Option<String>,
}

/// Boundary to the version-control executable.
///
/// Branch names returned by `remote_branches` are opaque tokens the caller
/// feeds back into `commits_on_branch`; the adapter owns any remote-prefix
/// qualification. Listings contain non-merge commit ids only, oldest first,
/// restricted to the window's inclusive local-time range.
#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Refresh remote refs. Callers tolerate failure here and proceed with
    /// whatever refs are available locally.
    async fn refresh(&self) -> AppResult<()>;

    /// Tracked remote branch names, symbolic default-branch pointer excluded.
    async fn remote_branches(&self) -> AppResult<Vec<String>>;

    /// Commit ids introduced on one branch within the window.
    async fn commits_on_branch(&self, branch: &str, window: &Window) -> AppResult<Vec<String>>;

    /// Commit ids across all tracked history within the window, in one
    /// globally time-ordered sequence.
    async fn commits_in_window(&self, window: &Window) -> AppResult<Vec<String>>;

    async fn commit_details(&self, id: &str) -> AppResult<CommitDetails>;

    /// Unified zero-context change content from `base` to `id` with the
    /// configured path exclusions applied. `None` means the empty baseline.
    /// Content can legitimately be empty; that is not an error.
    async fn change_content(&self, base: Option<&str>, id: &str) -> AppResult<String>;
}
