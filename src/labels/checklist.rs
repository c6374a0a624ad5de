//! Checklist matching over PR descriptions.
//!
//! A description line such as `- [x] Bug fix (non-breaking change)` marks the
//! "Bug fix" checkbox as checked, `- [ ] Bug fix` as explicitly unchecked.

use std::sync::OnceLock;

use regex::Regex;

use super::TypeCategory;

/// What the description says about one checklist marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistState {
    /// A checked checkbox line for the marker exists.
    Checked,
    /// Only an empty checkbox line for the marker exists.
    Unchecked,
    /// The description has no checkbox line for the marker.
    Absent,
}

struct ChecklistPattern {
    checked: Regex,
    unchecked: Regex,
}

impl ChecklistPattern {
    fn new(marker: &str) -> Result<Self, regex::Error> {
        let marker = regex::escape(marker.trim());
        // Marker ends the line or is followed by whitespace and free text
        let tail = format!(r"[ \t]+{marker}(?:[ \t\r].*)?$");
        let item = r"(?im)^[ \t]*[-*+][ \t]+";

        Ok(Self {
            checked: Regex::new(&format!(r"{item}\[[ \t]*x[ \t]*\]{tail}"))?,
            unchecked: Regex::new(&format!(r"{item}\[[ \t]*\]{tail}"))?,
        })
    }

    fn state(&self, body: Option<&str>) -> ChecklistState {
        let Some(body) = body else {
            return ChecklistState::Absent;
        };

        // Checked wins when a body carries both kinds of line
        if self.checked.is_match(body) {
            ChecklistState::Checked
        } else if self.unchecked.is_match(body) {
            ChecklistState::Unchecked
        } else {
            ChecklistState::Absent
        }
    }
}

fn category_patterns() -> &'static [Option<ChecklistPattern>] {
    static PATTERNS: OnceLock<Vec<Option<ChecklistPattern>>> = OnceLock::new();

    PATTERNS.get_or_init(|| {
        TypeCategory::ALL
            .iter()
            .map(|c| ChecklistPattern::new(c.marker_phrase()).ok())
            .collect()
    })
}

/// Compute the checklist state of `marker` in `body`.
///
/// A marker that cannot be compiled into a pattern (for instance one beyond
/// the regex size limit) matches nothing and yields [`ChecklistState::Absent`].
pub fn checklist_state(body: Option<&str>, marker: &str) -> ChecklistState {
    match ChecklistPattern::new(marker) {
        Ok(pattern) => pattern.state(body),
        Err(e) => {
            tracing::warn!(error = %e, "Checklist marker does not form a usable pattern");
            ChecklistState::Absent
        }
    }
}

impl TypeCategory {
    /// Same as [`checklist_state`] with this category's marker, using a cached pattern.
    pub fn checklist_state(self, body: Option<&str>) -> ChecklistState {
        category_patterns()[self.index()]
            .as_ref()
            .map_or(ChecklistState::Absent, |pattern| pattern.state(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_line() {
        let body = "## Types of changes\n\n- [x] Bug fix (non-breaking change)\n";
        assert_eq!(checklist_state(Some(body), "Bug fix"), ChecklistState::Checked);
    }

    #[test]
    fn test_checked_variants() {
        for body in [
            "- [X] Bug fix",
            "- [ x ] Bug fix",
            "- [x ] bug FIX and more",
            "  * [x] Bug fix",
            "intro\r\n- [x] Bug fix\r\nmore",
        ] {
            assert_eq!(
                checklist_state(Some(body), "Bug fix"),
                ChecklistState::Checked,
                "body: {body:?}"
            );
        }
    }

    #[test]
    fn test_unchecked_line() {
        for body in ["- [ ] Enhancement", "- [] Enhancement", "- [   ] Enhancement (adds)"] {
            assert_eq!(
                checklist_state(Some(body), "Enhancement"),
                ChecklistState::Unchecked,
                "body: {body:?}"
            );
        }
    }

    #[test]
    fn test_absent() {
        assert_eq!(checklist_state(None, "Bug fix"), ChecklistState::Absent);
        assert_eq!(checklist_state(Some(""), "Bug fix"), ChecklistState::Absent);
        assert_eq!(
            checklist_state(Some("Fixes a bug fix in the parser"), "Bug fix"),
            ChecklistState::Absent
        );
        // Marker must not be a prefix of a longer word
        assert_eq!(
            checklist_state(Some("- [x] Enhancements galore"), "Enhancement"),
            ChecklistState::Absent
        );
    }

    #[test]
    fn test_checked_takes_precedence() {
        let body = "- [ ] Bug fix\n- [x] Bug fix\n";
        assert_eq!(checklist_state(Some(body), "Bug fix"), ChecklistState::Checked);
        let body = "- [x] Bug fix\n- [ ] Bug fix\n";
        assert_eq!(checklist_state(Some(body), "Bug fix"), ChecklistState::Checked);
    }

    #[test]
    fn test_marker_is_literal() {
        assert_eq!(
            checklist_state(Some("- [x] C++ fix"), "C++ fix"),
            ChecklistState::Checked
        );
        assert_eq!(
            checklist_state(Some("- [x] Cxx fix"), "C.. fix"),
            ChecklistState::Absent
        );
    }

    #[test]
    fn test_category_patterns_agree_with_free_function() {
        let body = "- [x] Bug fix and fix for X\n- [ ] Enhancement";
        for category in TypeCategory::ALL {
            assert_eq!(
                category.checklist_state(Some(body)),
                checklist_state(Some(body), category.marker_phrase())
            );
        }
        assert_eq!(TypeCategory::Bug.checklist_state(Some(body)), ChecklistState::Checked);
        assert_eq!(
            TypeCategory::Enhancement.checklist_state(Some(body)),
            ChecklistState::Unchecked
        );
        assert_eq!(TypeCategory::Cleanup.checklist_state(Some(body)), ChecklistState::Absent);
    }

    #[test]
    fn test_oversized_marker_is_absent_not_a_panic() {
        let marker = "k".repeat(1_000_000);
        assert_eq!(checklist_state(Some("- [x] Bug fix"), &marker), ChecklistState::Absent);
        assert_eq!(checklist_state(None, &marker), ChecklistState::Absent);
    }
}
