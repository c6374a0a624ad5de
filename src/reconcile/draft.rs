use std::collections::BTreeSet;

use crate::labels::has_label;

use super::LabelMutation;

/// Keep the work-in-progress label in step with the draft flag.
///
/// Returns the single mutation needed, if any. Applying the result and
/// calling again yields `None`.
pub fn draft_toggle(
    draft: bool,
    labels: &BTreeSet<String>,
    wip_label: &str,
) -> Option<LabelMutation> {
    match (draft, has_label(labels, wip_label)) {
        (true, false) => Some(LabelMutation::Add(wip_label.to_string())),
        (false, true) => Some(LabelMutation::Remove(wip_label.to_string())),
        _ => None,
    }
}
