use std::collections::{BTreeMap, BTreeSet};

/// Hex characters shown when a commit id is displayed or used as a link
/// stand-in.
pub const SHORT_ID_LEN: usize = 8;

/// A changeset retained for the report. Value object: identity is `id` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub title: String,
    pub author: String,
    pub link: String,
    /// Sorted, deduplicated tracked branches this commit is reachable from.
    /// Populated during collection and never mutated afterwards.
    pub branches: Vec<String>,
}

impl Commit {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    pub fn branch_list(&self) -> String {
        self.branches.join(", ")
    }
}

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Display link for a commit. Without a configured repository base URL the
/// short id stands in; a guessed URL would be worse than none.
pub fn commit_link(repo_url: Option<&str>, id: &str) -> String {
    match repo_url {
        Some(base) => format!("{base}/commit/{id}"),
        None => short_id(id).to_string(),
    }
}

/// Commit id → set of tracked branches able to reach it. Written only while
/// branches are being scanned, then read-only: the single source of truth
/// for `Commit.branches` and for filtering the unioned history.
#[derive(Debug, Default)]
pub struct AttributionMap {
    by_commit: BTreeMap<String, BTreeSet<String>>,
}

impl AttributionMap {
    pub fn record(&mut self, id: &str, branch: &str) {
        self.by_commit
            .entry(id.to_string())
            .or_default()
            .insert(branch.to_string());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_commit.contains_key(id)
    }

    /// Sorted branch names for a commit; empty when the commit is untracked.
    pub fn branches(&self, id: &str) -> Vec<String> {
        self.by_commit
            .get(id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_commit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_commit.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribution_unions_and_sorts_branches() {
        let mut map = AttributionMap::default();
        map.record("abc", "release/2");
        map.record("abc", "main");
        map.record("abc", "main");

        assert_eq!(map.branches("abc"), vec!["main", "release/2"]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn untracked_commit_has_no_branches() {
        let map = AttributionMap::default();
        assert!(!map.contains("abc"));
        assert!(map.branches("abc").is_empty());
    }

    #[test]
    fn links_use_repo_url_when_configured() {
        assert_eq!(
            commit_link(Some("https://github.com/acme/widget"), "0123456789abcdef"),
            "https://github.com/acme/widget/commit/0123456789abcdef"
        );
        assert_eq!(commit_link(None, "0123456789abcdef"), "01234567");
    }

    #[test]
    fn short_id_tolerates_short_input() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789"), "01234567");
    }
}
