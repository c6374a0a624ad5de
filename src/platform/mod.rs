pub mod github;
#[cfg(test)]
pub mod memory;
pub mod types;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use types::*;

/// Read side of the issue tracker.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Numbers of all open pull requests in the repository.
    async fn open_pull_requests(&self) -> Result<Vec<u64>>;

    /// Numbers of pull requests merged into the configured branch on or after `since`.
    async fn merged_pull_requests_since(&self, since: NaiveDate) -> Result<Vec<u64>>;

    /// Fetch a pull request with its labels.
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest>;

    /// Date of the commit a release reference points at.
    async fn reference_date(&self, reference: &ReleaseReference) -> Result<NaiveDate>;
}

/// Write side of the issue tracker. Both calls are idempotent from the
/// caller's point of view.
#[async_trait]
pub trait LabelMutator: Send + Sync {
    /// Add a label to a PR.
    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()>;

    /// Remove a label from a PR.
    async fn remove_label(&self, pr_number: u64, label: &str) -> Result<()>;
}
