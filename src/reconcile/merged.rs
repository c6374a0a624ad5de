use std::collections::BTreeSet;

use crate::labels::{has_label, TypeCategory};

/// Why a merged PR could not be placed in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyReason {
    NoLabels,
    NoLabelMatch,
    TooManyLabels,
}

impl std::fmt::Display for AnomalyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AnomalyReason::NoLabels => "No labels",
            AnomalyReason::NoLabelMatch => "No label match",
            AnomalyReason::TooManyLabels => "Too many labels",
        })
    }
}

/// Release-note buckets a merged PR falls into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedClassification {
    pub feature: bool,
    pub fix: bool,
    pub enhancement: bool,
    pub anomalies: Vec<AnomalyReason>,
}

impl MergedClassification {
    pub fn match_count(&self) -> usize {
        [self.feature, self.fix, self.enhancement]
            .iter()
            .filter(|m| **m)
            .count()
    }

    pub fn is_anomalous(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// All anomaly reasons as one report cell.
    pub fn anomaly_summary(&self) -> String {
        self.anomalies
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Bucket a merged PR by its labels.
///
/// A PR matching several buckets is kept in each of them and also flagged
/// as `TooManyLabels`.
pub fn bucket_merged(labels: &BTreeSet<String>) -> MergedClassification {
    let mut classification = MergedClassification {
        feature: has_label(labels, TypeCategory::NewFeature.label_name()),
        fix: has_label(labels, TypeCategory::Bug.label_name())
            || has_label(labels, TypeCategory::Cleanup.label_name()),
        enhancement: has_label(labels, TypeCategory::Enhancement.label_name()),
        anomalies: Vec::new(),
    };

    let matches = classification.match_count();
    if labels.is_empty() {
        classification.anomalies.push(AnomalyReason::NoLabels);
    }
    if matches == 0 {
        classification.anomalies.push(AnomalyReason::NoLabelMatch);
    }
    if matches > 1 {
        classification.anomalies.push(AnomalyReason::TooManyLabels);
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_buckets() {
        let c = bucket_merged(&labels(&["type:new-feature"]));
        assert!(c.feature && !c.fix && !c.enhancement && !c.is_anomalous());

        let c = bucket_merged(&labels(&["type:cleanup", "component:ui"]));
        assert!(c.fix && !c.is_anomalous());

        let c = bucket_merged(&labels(&["type:enhancement"]));
        assert!(c.enhancement && !c.is_anomalous());
    }

    #[test]
    fn test_bug_and_cleanup_count_once() {
        let c = bucket_merged(&labels(&["type:bug", "type:cleanup"]));
        assert_eq!(c.match_count(), 1);
        assert!(!c.is_anomalous());
    }

    #[test]
    fn test_feature_and_bug_is_double_booked() {
        let c = bucket_merged(&labels(&["type:new-feature", "type:bug"]));
        assert!(c.feature);
        assert!(c.fix);
        assert_eq!(c.anomalies, vec![AnomalyReason::TooManyLabels]);
        assert_eq!(c.anomaly_summary(), "Too many labels");
    }

    #[test]
    fn test_no_labels_records_every_reason() {
        let c = bucket_merged(&labels(&[]));
        assert_eq!(
            c.anomalies,
            vec![AnomalyReason::NoLabels, AnomalyReason::NoLabelMatch]
        );
        assert_eq!(c.anomaly_summary(), "No labels; No label match");
    }

    #[test]
    fn test_unrelated_labels() {
        let c = bucket_merged(&labels(&["component:api", "type:experimental-feature"]));
        assert_eq!(c.anomalies, vec![AnomalyReason::NoLabelMatch]);
    }
}
