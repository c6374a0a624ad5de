//! The fixed set of type categories and the label-side checks.

pub mod checklist;

use std::collections::BTreeSet;

pub use checklist::{checklist_state, ChecklistState};

/// Classification categories. The set is closed: every PR is checked
/// against all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeCategory {
    Bug,
    Enhancement,
    ExperimentalFeature,
    NewFeature,
    Cleanup,
    BreakingChange,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 6] = [
        TypeCategory::Bug,
        TypeCategory::Enhancement,
        TypeCategory::ExperimentalFeature,
        TypeCategory::NewFeature,
        TypeCategory::Cleanup,
        TypeCategory::BreakingChange,
    ];

    /// The canonical label applied on GitHub.
    pub fn label_name(self) -> &'static str {
        match self {
            TypeCategory::Bug => "type:bug",
            TypeCategory::Enhancement => "type:enhancement",
            TypeCategory::ExperimentalFeature => "type:experimental-feature",
            TypeCategory::NewFeature => "type:new-feature",
            TypeCategory::Cleanup => "type:cleanup",
            TypeCategory::BreakingChange => "type:breaking-change",
        }
    }

    /// The checkbox caption searched for in the PR description.
    pub fn marker_phrase(self) -> &'static str {
        match self {
            TypeCategory::Bug => "Bug fix",
            TypeCategory::Enhancement => "Enhancement",
            TypeCategory::ExperimentalFeature => "Experimental feature",
            TypeCategory::NewFeature => "New feature",
            TypeCategory::Cleanup => "Cleanup",
            TypeCategory::BreakingChange => "Breaking change",
        }
    }

    fn index(self) -> usize {
        match self {
            TypeCategory::Bug => 0,
            TypeCategory::Enhancement => 1,
            TypeCategory::ExperimentalFeature => 2,
            TypeCategory::NewFeature => 3,
            TypeCategory::Cleanup => 4,
            TypeCategory::BreakingChange => 5,
        }
    }
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label_name())
    }
}

/// Exact, case-sensitive label membership.
pub fn has_label(labels: &BTreeSet<String>, name: &str) -> bool {
    labels.contains(name)
}
