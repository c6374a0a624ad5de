//! Label reconciliation decisions. Everything here is pure: callers pass in
//! PR state and get back what should change.

pub mod category;
pub mod draft;
pub mod merged;
pub mod verdict;

use std::collections::BTreeSet;

use crate::labels::{has_label, TypeCategory};
use crate::platform::types::PullRequest;

pub use category::{reconcile_category, CategoryOutcome, CategoryResult, ReconciliationTally};
pub use draft::draft_toggle;
pub use merged::{bucket_merged, AnomalyReason, MergedClassification};
pub use verdict::{classify, Verdict};

/// A label change requested against a PR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMutation {
    Add(String),
    Remove(String),
}

impl LabelMutation {
    pub fn label(&self) -> &str {
        match self {
            LabelMutation::Add(label) | LabelMutation::Remove(label) => label,
        }
    }

    /// Apply the change to a local label set.
    pub fn apply_to(&self, labels: &mut BTreeSet<String>) {
        match self {
            LabelMutation::Add(label) => {
                labels.insert(label.clone());
            }
            LabelMutation::Remove(label) => {
                labels.remove(label);
            }
        }
    }
}

impl std::fmt::Display for LabelMutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelMutation::Add(label) => write!(f, "Label '{label}' added"),
            LabelMutation::Remove(label) => write!(f, "Label '{label}' removed"),
        }
    }
}

/// Full type-label reconciliation of one PR.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub results: Vec<CategoryResult>,
    pub tally: ReconciliationTally,
    pub verdict: Verdict,
}

impl Reconciliation {
    /// Mutations to apply for this verdict. Type labels are only ever added;
    /// labels contradicting an unchecked box are reported, not removed.
    pub fn mutations(&self) -> Vec<LabelMutation> {
        match self.verdict {
            Verdict::AddLabel(category) => {
                vec![LabelMutation::Add(category.label_name().to_string())]
            }
            _ => Vec::new(),
        }
    }

    /// Categories whose checkbox is ticked.
    pub fn checked_categories(&self) -> Vec<TypeCategory> {
        self.results
            .iter()
            .filter(|r| r.state == crate::labels::ChecklistState::Checked)
            .map(|r| r.category)
            .collect()
    }

    /// Categories whose label is on the PR.
    pub fn labelled_categories(&self) -> Vec<TypeCategory> {
        self.results
            .iter()
            .filter(|r| r.label_present)
            .map(|r| r.category)
            .collect()
    }
}

/// Compare every category's checkbox in `body` with the PR's labels.
pub fn reconcile_labels(body: Option<&str>, labels: &BTreeSet<String>) -> Reconciliation {
    let mut tally = ReconciliationTally::default();
    let results: Vec<CategoryResult> = TypeCategory::ALL
        .iter()
        .map(|&category| {
            let state = category.checklist_state(body);
            let label_present = has_label(labels, category.label_name());
            let result = CategoryResult {
                category,
                state,
                label_present,
                outcome: reconcile_category(state, label_present),
            };
            tally.record(&result);
            result
        })
        .collect();

    let verdict = classify(&tally);

    Reconciliation {
        results,
        tally,
        verdict,
    }
}

pub fn reconcile_pull_request(pr: &PullRequest) -> Reconciliation {
    reconcile_labels(pr.body.as_deref(), &pr.labels)
}
