use crate::labels::TypeCategory;

use super::category::ReconciliationTally;

/// Overall outcome for one PR once every category has been compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Exactly one category has both a checked box and its label.
    Ok,
    /// Several boxes checked or several type labels present.
    Ambiguous,
    /// A checked box and a type label, but for different categories.
    Mismatch,
    /// Type label present with nothing checked.
    LabelWithoutDescription,
    /// One checked box without its label: add it.
    AddLabel(TypeCategory),
    /// No type label and nothing checked.
    Uncategorized,
    /// Fell through every rule. Always reported, never dropped.
    Indeterminate,
}

/// Pick the verdict for a tally. Rules are evaluated in order and the first
/// match wins; ambiguity is caught before any automatic fix is attempted.
pub fn classify(tally: &ReconciliationTally) -> Verdict {
    if tally.matched_count == 1 {
        return Verdict::Ok;
    }
    if tally.checked_count > 1 || tally.label_present_count > 1 {
        return Verdict::Ambiguous;
    }
    if tally.checked_count > 0 && tally.label_present_count > 0 {
        return Verdict::Mismatch;
    }
    if tally.label_present_count > 0 && tally.checked_count == 0 {
        return Verdict::LabelWithoutDescription;
    }
    if tally.missing_label_count == 1 {
        if let Some(&category) = tally.missing.first() {
            return Verdict::AddLabel(category);
        }
    }
    // An untouched template reads the same as no checklist at all
    if tally.no_match_count + tally.unchecked_count == TypeCategory::ALL.len() {
        return Verdict::Uncategorized;
    }
    Verdict::Indeterminate
}
