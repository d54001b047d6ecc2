use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::window::Window;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;
use crate::services::version_control::CommitDetails;

/// Git's well-known empty tree object, the diff baseline for root commits.
const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

const REMOTE: &str = "origin";

pub struct GitCli {
    workspace_root: PathBuf,
    exclude_paths: Vec<String>,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf, exclude_paths: Vec<String>) -> Self {
        Self {
            workspace_root,
            exclude_paths,
        }
    }

    async fn run(&self, args: &[&str]) -> AppResult<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to spawn git: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or("<none>"),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn list_ids(&self, args: &[&str]) -> AppResult<Vec<String>> {
        let stdout = self.run(args).await?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn refresh(&self) -> AppResult<()> {
        self.run(&["fetch", "--all", "--prune", "--quiet"]).await?;
        Ok(())
    }

    async fn remote_branches(&self) -> AppResult<Vec<String>> {
        let pattern = format!("refs/remotes/{REMOTE}");
        let prefix = format!("refs/remotes/{REMOTE}/");
        let stdout = self
            .run(&["for-each-ref", "--format=%(refname)", &pattern])
            .await?;

        Ok(stdout
            .lines()
            .filter_map(|line| branch_name(line.trim(), &prefix))
            .collect())
    }

    async fn commits_on_branch(&self, branch: &str, window: &Window) -> AppResult<Vec<String>> {
        let target = format!("{REMOTE}/{branch}");
        let since = format!("--since={}", window.start.to_rfc3339());
        let until = format!("--until={}", window.end.to_rfc3339());
        self.list_ids(&[
            "log",
            &target,
            "--no-merges",
            "--reverse",
            "--format=%H",
            &since,
            &until,
        ])
        .await
    }

    async fn commits_in_window(&self, window: &Window) -> AppResult<Vec<String>> {
        let since = format!("--since={}", window.start.to_rfc3339());
        let until = format!("--until={}", window.end.to_rfc3339());
        // --date-order pins the union to commit time, not topology, so the
        // cross-branch ordering is deterministic.
        self.list_ids(&[
            "log",
            "--all",
            "--no-merges",
            "--date-order",
            "--reverse",
            "--format=%H",
            &since,
            &until,
        ])
        .await
    }

    async fn commit_details(&self, id: &str) -> AppResult<CommitDetails> {
        // Parents and author first; the subject goes last so embedded tabs
        // cannot shift fields.
        let stdout = self
            .run(&["show", "-s", "--format=%P%x09%an%x09%s", id])
            .await?;
        parse_details(stdout.trim_end(), id)
    }

    async fn change_content(&self, base: Option<&str>, id: &str) -> AppResult<String> {
        let base = base.unwrap_or(EMPTY_TREE);
        let mut args = vec!["diff", "--unified=0", base, id, "--", "."];

        let excludes: Vec<String> = self
            .exclude_paths
            .iter()
            .map(|glob| format!(":(exclude){glob}"))
            .collect();
        args.extend(excludes.iter().map(String::as_str));

        self.run(&args).await
    }
}

/// `refs/remotes/origin/feature/x` → `feature/x`; the symbolic HEAD pointer
/// and refs of other remotes are dropped.
fn branch_name(refname: &str, prefix: &str) -> Option<String> {
    let name = refname.strip_prefix(prefix)?;
    if name.is_empty() || name == "HEAD" {
        return None;
    }
    Some(name.to_string())
}

fn parse_details(line: &str, id: &str) -> AppResult<CommitDetails> {
    let mut fields = line.splitn(3, '\t');
    let parents = fields.next().unwrap_or_default();
    let author = fields.next();
    let title = fields.next();

    let (Some(author), Some(title)) = (author, title) else {
        return Err(AppError::VersionControl(format!(
            "malformed metadata for commit {id}: '{line}'"
        )));
    };

    Ok(CommitDetails {
        title: title.to_string(),
        author: author.to_string(),
        // Merge commits never reach the pipeline, so the first parent is the
        // only one a diff can be taken against.
        parent: parents.split_whitespace().next().map(str::to_string),
    })
}
