use crate::reconcile::{LabelMutation, Verdict};

/// Settings shared by both phases.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// When `false` mutations are computed and reported but never sent.
    pub apply: bool,
    pub wip_label: String,
}

/// What happened to a requested label change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationStatus {
    Applied,
    /// Dry run: the change was only reported.
    Skipped,
    /// GitHub rejected the change.
    Failed { error: String },
}

/// A requested label change and its fate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub mutation: LabelMutation,
    pub status: MutationStatus,
}

impl MutationOutcome {
    /// Report text: the intended action plus an annotation when it did not land.
    pub fn describe(&self) -> String {
        match &self.status {
            MutationStatus::Applied => self.mutation.to_string(),
            MutationStatus::Skipped => format!("{} (dry run)", self.mutation),
            MutationStatus::Failed { error } => format!("{} (failed: {error})", self.mutation),
        }
    }
}

/// Outcome of processing one open PR.
#[derive(Debug, Clone)]
pub enum OpenPrOutcome {
    Reconciled {
        number: u64,
        verdict: Verdict,
        /// Draft toggle first, then any type-label change.
        mutations: Vec<MutationOutcome>,
    },
    /// The PR could not be fetched or mapped.
    Failed { number: u64, error: String },
}
