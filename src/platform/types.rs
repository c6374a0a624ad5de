use std::collections::BTreeSet;

/// A pull request as seen by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// `None` when the author left the description empty.
    pub body: Option<String>,
    pub draft: bool,
    pub labels: BTreeSet<String>,
    /// Present only once merged.
    pub merge_commit_sha: Option<String>,
}

impl PullRequest {
    pub fn has_label(&self, name: &str) -> bool {
        crate::labels::has_label(&self.labels, name)
    }
}

/// Where the merged-PR window starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseReference {
    Commit(String),
    Tag(String),
}

impl ReleaseReference {
    /// The git ref to resolve, either a SHA or a tag name.
    pub fn as_ref_name(&self) -> &str {
        match self {
            ReleaseReference::Commit(sha) => sha,
            ReleaseReference::Tag(tag) => tag,
        }
    }
}

impl std::fmt::Display for ReleaseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseReference::Commit(sha) => write!(f, "commit {sha}"),
            ReleaseReference::Tag(tag) => write!(f, "tag {tag}"),
        }
    }
}
