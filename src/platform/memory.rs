//! In-memory platform used by the workflow tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::{LabelMutator, PullRequestSource};
use crate::reconcile::LabelMutation;

#[derive(Default)]
pub struct InMemoryPlatform {
    pulls: Mutex<BTreeMap<u64, PullRequest>>,
    open: Vec<u64>,
    merged: Vec<u64>,
    broken: BTreeSet<u64>,
    rejected_labels: BTreeSet<String>,
    reference_date: Option<NaiveDate>,
    calls: Mutex<Vec<(u64, LabelMutation)>>,
}

pub fn pr(number: u64, body: Option<&str>, draft: bool, labels: &[&str]) -> PullRequest {
    PullRequest {
        number,
        title: format!("PR {number}"),
        body: body.map(str::to_string),
        draft,
        labels: labels.iter().map(|l| l.to_string()).collect(),
        merge_commit_sha: None,
    }
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self {
            reference_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        }
    }

    pub fn with_open(mut self, pr: PullRequest) -> Self {
        self.open.push(pr.number);
        self.insert(pr);
        self
    }

    pub fn with_merged(mut self, mut pr: PullRequest) -> Self {
        pr.merge_commit_sha = Some(format!("{:040x}", pr.number));
        self.merged.push(pr.number);
        self.insert(pr);
        self
    }

    /// Listed by search but failing on fetch.
    pub fn with_broken(mut self, number: u64, merged: bool) -> Self {
        if merged {
            self.merged.push(number);
        } else {
            self.open.push(number);
        }
        self.broken.insert(number);
        self
    }

    /// Reject every mutation of this label.
    pub fn rejecting(mut self, label: &str) -> Self {
        self.rejected_labels.insert(label.to_string());
        self
    }

    pub fn without_reference(mut self) -> Self {
        self.reference_date = None;
        self
    }

    fn insert(&self, pr: PullRequest) {
        self.pulls.lock().unwrap().insert(pr.number, pr);
    }

    pub fn labels_of(&self, number: u64) -> BTreeSet<String> {
        self.pulls.lock().unwrap()[&number].labels.clone()
    }

    pub fn calls(&self) -> Vec<(u64, LabelMutation)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn mutate(&self, number: u64, mutation: LabelMutation) -> Result<()> {
        self.calls.lock().unwrap().push((number, mutation.clone()));
        if self.rejected_labels.contains(mutation.label()) {
            return Err(AppError::GitHubApi(format!(
                "label {} rejected",
                mutation.label()
            )));
        }

        let mut pulls = self.pulls.lock().unwrap();
        let pr = pulls
            .get_mut(&number)
            .ok_or_else(|| AppError::GitHubApi(format!("no PR #{number}")))?;
        mutation.apply_to(&mut pr.labels);
        Ok(())
    }
}

#[async_trait]
impl PullRequestSource for InMemoryPlatform {
    async fn open_pull_requests(&self) -> Result<Vec<u64>> {
        Ok(self.open.clone())
    }

    async fn merged_pull_requests_since(&self, _since: NaiveDate) -> Result<Vec<u64>> {
        Ok(self.merged.clone())
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        if self.broken.contains(&number) {
            return Err(AppError::MalformedPullRequest {
                number,
                reason: "missing title".to_string(),
            });
        }
        self.pulls
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| AppError::GitHubApi(format!("no PR #{number}")))
    }

    async fn reference_date(&self, reference: &ReleaseReference) -> Result<NaiveDate> {
        self.reference_date
            .ok_or_else(|| AppError::Reference(format!("Failed to resolve {reference}")))
    }
}

#[async_trait]
impl LabelMutator for InMemoryPlatform {
    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.mutate(pr_number, LabelMutation::Add(label.to_string()))
    }

    async fn remove_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.mutate(pr_number, LabelMutation::Remove(label.to_string()))
    }
}
