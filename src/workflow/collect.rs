use std::collections::HashSet;

use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::commit::{AttributionMap, Commit, commit_link};
use crate::domain::window::Window;
use crate::error::AppResult;

/// Gather every commit inside the window across all tracked branches,
/// deduplicated by id and attributed to the union of branches that can
/// reach it. Ordering follows the repository-wide history walk, not the
/// per-branch scan order.
pub async fn collect_commits(ctx: &AppContext, window: &Window) -> AppResult<Vec<Commit>> {
    let vcs = ctx.version_control.as_ref();
    let cap = ctx.config.branch_commit_cap;

    let mut attribution = AttributionMap::default();
    for branch in vcs.remote_branches().await? {
        let ids = match vcs.commits_on_branch(&branch, window).await {
            Ok(ids) => ids,
            Err(err) => {
                warn!(branch = %branch, error = %err, "skipping unreadable branch");
                continue;
            }
        };
        for id in recent(ids, cap) {
            attribution.record(&id, &branch);
        }
    }

    // From here the map is read-only.
    if attribution.is_empty() {
        return Ok(Vec::new());
    }
    debug!(commits = attribution.len(), "attributed window activity");

    let mut seen = HashSet::new();
    let mut commits = Vec::new();
    for id in vcs.commits_in_window(window).await? {
        if !attribution.contains(&id) || !seen.insert(id.clone()) {
            continue;
        }
        let details = vcs.commit_details(&id).await?;
        commits.push(Commit {
            branches: attribution.branches(&id),
            link: commit_link(ctx.config.repo_url.as_deref(), &id),
            title: details.title,
            author: details.author,
            id,
        });
    }

    Ok(commits)
}

/// Keep the `cap` most recent entries of an oldest-first listing.
fn recent(mut ids: Vec<String>, cap: usize) -> Vec<String> {
    if ids.len() > cap {
        ids.split_off(ids.len() - cap)
    } else {
        ids
    }
}
