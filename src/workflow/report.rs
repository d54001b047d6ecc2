use chrono::Utc;
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::domain::chunk::{GitPatchBoundary, chunk_changes};
use crate::domain::window::{Window, current_week};
use crate::error::AppResult;
use crate::workflow::collect::collect_commits;
use crate::workflow::summarize::{summarize_commit, summarize_window};

#[derive(Debug)]
pub enum ReportOutcome {
    /// Quiet week: nothing collected, nothing delivered.
    Empty { window: Window },
    Delivered { window: Window, commits: usize },
}

/// Run the full pipeline for the week containing the current instant.
pub async fn run_report(ctx: &AppContext) -> AppResult<ReportOutcome> {
    let window = current_week(Utc::now(), ctx.config.utc_offset);
    run_report_for(ctx, window).await
}

/// Resolve, collect, chunk, summarize and deliver for one window. Commits
/// and chunks are processed strictly one at a time; only a dispatch failure
/// (or a broken VCS) propagates, everything the model does wrong folds into
/// the report text.
pub async fn run_report_for(ctx: &AppContext, window: Window) -> AppResult<ReportOutcome> {
    info!(window = %window.label, "building weekly report");

    if let Err(err) = ctx.version_control.refresh().await {
        warn!(error = %err, "fetch refresh failed, proceeding with local refs");
    }

    let commits = collect_commits(ctx, &window).await?;
    if commits.is_empty() {
        info!(window = %window.label, "no commits in window, skipping report");
        return Ok(ReportOutcome::Empty { window });
    }
    info!(commits = commits.len(), "collected window activity");

    let boundary = GitPatchBoundary;
    let mut summaries = Vec::with_capacity(commits.len());
    for commit in commits {
        let changes = commit_changes(ctx, &commit.id).await?;
        let chunks = chunk_changes(&changes, ctx.config.max_chunk_chars, &boundary);
        debug!(commit = commit.short_id(), chunks = chunks.len(), "chunked changes");

        let summary = summarize_commit(ctx, &commit, &chunks).await;
        summaries.push((commit, summary));
    }

    let report = summarize_window(ctx, &window, &summaries).await;
    ctx.notifier.deliver(&report).await?;
    info!(window = %window.label, "report delivered");

    Ok(ReportOutcome::Delivered {
        window,
        commits: summaries.len(),
    })
}

/// Change content against the commit's single parent, or against the empty
/// baseline for root commits. Path exclusions are applied inside the
/// adapter; empty content is a legitimate result, not an error.
async fn commit_changes(ctx: &AppContext, id: &str) -> AppResult<String> {
    let details = ctx.version_control.commit_details(id).await?;
    ctx.version_control
        .change_content(details.parent.as_deref(), id)
        .await
}
