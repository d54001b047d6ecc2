use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::commit::Commit;
use crate::domain::window::Window;

/// Commit summary used when exclusion filtering leaves nothing to send to
/// the model.
pub const NO_CONTENT_PLACEHOLDER: &str =
    "No reviewable changes (the commit only touched excluded paths or was empty).";

/// Reduce one commit to a single summary string. Never fails: every chunk
/// call and the merge call degrade to deterministic fallback text, so the
/// caller always receives something to put in the report.
pub async fn summarize_commit(ctx: &AppContext, commit: &Commit, chunks: &[String]) -> String {
    if chunks.is_empty() {
        debug!(commit = commit.short_id(), "no content after exclusions");
        return NO_CONTENT_PLACEHOLDER.to_string();
    }

    let total = chunks.len();
    let mut leaves = Vec::with_capacity(total);
    for (index, chunk) in chunks.iter().enumerate() {
        let position = index + 1;
        let prompt = chunk_prompt(commit, position, total, chunk);
        let leaf = match ctx.language_model.summarize(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    commit = commit.short_id(),
                    position,
                    total,
                    error = %err,
                    "chunk summarization failed, falling back"
                );
                format!("[Summary unavailable for part {position} of {total}: {err}]")
            }
        };
        leaves.push(leaf);
    }

    match ctx.language_model.summarize(&merge_prompt(commit, &leaves)).await {
        Ok(text) => text,
        Err(err) => {
            warn!(
                commit = commit.short_id(),
                error = %err,
                "commit merge failed, concatenating leaf summaries"
            );
            concatenated_leaves(&leaves)
        }
    }
}

/// Reduce every commit summary into the window report. Never fails: a merge
/// failure produces the degraded concatenated report instead.
pub async fn summarize_window(
    ctx: &AppContext,
    window: &Window,
    summaries: &[(Commit, String)],
) -> String {
    let prompt = window_prompt(window, summaries);
    match ctx.language_model.summarize(&prompt).await {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "window merge failed, emitting degraded report");
            degraded_report(window, summaries)
        }
    }
}

fn chunk_prompt(commit: &Commit, position: usize, total: usize, chunk: &str) -> String {
    format!(
        "You are preparing a weekly engineering activity report.\n\
         Commit {} \"{}\" by {} (branches: {}).\n\
         Below is part {position} of {total} of the commit's diff. Summarize in a few \
         plain sentences what this part changes. Stick to the diff; do not speculate.\n\n\
         {chunk}",
        commit.short_id(),
        commit.title,
        commit.author,
        commit.branch_list(),
    )
}

fn merge_prompt(commit: &Commit, leaves: &[String]) -> String {
    let mut prompt = format!(
        "Combine the following partial summaries of commit {} \"{}\" by {} (branches: {}) \
         into one short, coherent summary of the whole commit. Keep every distinct change; \
         drop the part numbering.\n",
        commit.short_id(),
        commit.title,
        commit.author,
        commit.branch_list(),
    );
    for (index, leaf) in leaves.iter().enumerate() {
        prompt.push_str(&format!("\nPart {} of {}:\n{leaf}\n", index + 1, leaves.len()));
    }
    prompt
}

fn window_prompt(window: &Window, summaries: &[(Commit, String)]) -> String {
    let mut prompt = format!(
        "Write a weekly activity report for {} covering the {} commits below, \
         oldest first. Group related work, mention authors and branches where relevant, \
         and keep it readable for a team channel.\n",
        window.label,
        summaries.len(),
    );
    for (commit, summary) in summaries {
        prompt.push_str(&format!(
            "\nCommit {} \"{}\" by {} (branches: {})\nLink: {}\n{summary}\n",
            commit.short_id(),
            commit.title,
            commit.author,
            commit.branch_list(),
            commit.link,
        ));
    }
    prompt
}

fn concatenated_leaves(leaves: &[String]) -> String {
    leaves
        .iter()
        .enumerate()
        .map(|(index, leaf)| format!("Part {} of {}:\n{leaf}", index + 1, leaves.len()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn degraded_report(window: &Window, summaries: &[(Commit, String)]) -> String {
    let mut report = format!(
        "Weekly activity report {} (degraded: automatic consolidation unavailable)\n",
        window.label
    );
    for (commit, summary) in summaries {
        report.push_str(&format!(
            "\n--- {} \"{}\" by {} (branches: {})\nLink: {}\n{summary}\n",
            commit.short_id(),
            commit.title,
            commit.author,
            commit.branch_list(),
            commit.link,
        ));
    }
    report
}
