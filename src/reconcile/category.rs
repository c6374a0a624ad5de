use crate::labels::{ChecklistState, TypeCategory};

/// Result of comparing one category's checkbox against its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// Checked and labelled.
    Matched,
    /// Checked but the label is missing; the label should be added.
    MissingLabel,
    /// Explicitly unchecked but labelled; the label contradicts the description.
    IncorrectLabel,
    /// Explicitly unchecked and not labelled. Not reported.
    Unchecked,
    /// Labelled but the description has no line for the category.
    LabelWithoutDescription,
    /// Neither label nor checklist line.
    NoMatch,
}

/// Apply the per-category decision table.
pub fn reconcile_category(state: ChecklistState, label_present: bool) -> CategoryOutcome {
    match (state, label_present) {
        (ChecklistState::Checked, false) => CategoryOutcome::MissingLabel,
        (ChecklistState::Checked, true) => CategoryOutcome::Matched,
        (ChecklistState::Unchecked, true) => CategoryOutcome::IncorrectLabel,
        (ChecklistState::Unchecked, false) => CategoryOutcome::Unchecked,
        (ChecklistState::Absent, true) => CategoryOutcome::LabelWithoutDescription,
        (ChecklistState::Absent, false) => CategoryOutcome::NoMatch,
    }
}

/// One row of a PR's reconciliation, kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryResult {
    pub category: TypeCategory,
    pub state: ChecklistState,
    pub label_present: bool,
    pub outcome: CategoryOutcome,
}

/// Counters accumulated over every category of a single PR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationTally {
    pub checked_count: usize,
    pub label_present_count: usize,
    pub matched_count: usize,
    pub missing_label_count: usize,
    pub incorrect_label_count: usize,
    pub label_without_desc_count: usize,
    pub no_match_count: usize,
    pub unchecked_count: usize,
    /// Categories whose label would be added.
    pub missing: Vec<TypeCategory>,
    /// Categories whose label contradicts an unchecked box.
    pub incorrect: Vec<TypeCategory>,
}

impl ReconciliationTally {
    pub fn record(&mut self, result: &CategoryResult) {
        if result.state == ChecklistState::Checked {
            self.checked_count += 1;
        }
        if result.label_present {
            self.label_present_count += 1;
        }

        match result.outcome {
            CategoryOutcome::Matched => self.matched_count += 1,
            CategoryOutcome::MissingLabel => {
                self.missing_label_count += 1;
                self.missing.push(result.category);
            }
            CategoryOutcome::IncorrectLabel => {
                self.incorrect_label_count += 1;
                self.incorrect.push(result.category);
            }
            CategoryOutcome::Unchecked => self.unchecked_count += 1,
            CategoryOutcome::LabelWithoutDescription => self.label_without_desc_count += 1,
            CategoryOutcome::NoMatch => self.no_match_count += 1,
        }
    }
}
