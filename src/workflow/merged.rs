use chrono::NaiveDate;

use crate::error::Result;
use crate::labels::TypeCategory;
use crate::platform::types::PullRequest;
use crate::platform::PullRequestSource;
use crate::reconcile::{bucket_merged, MergedClassification};
use crate::report::{ReportBucket, ReportRow, ReportSink, Summary};

const MERGED: &str = "MERGED";

/// Tabulate PRs merged since `since` into release-note buckets.
pub async fn tabulate_merged<S, R>(
    source: &S,
    since: NaiveDate,
    report: &mut R,
    summary: &mut Summary,
) -> Result<Vec<(u64, MergedClassification)>>
where
    S: PullRequestSource,
    R: ReportSink,
{
    tracing::info!(since = %since, "Retrieving merged pull requests");
    let numbers = source.merged_pull_requests_since(since).await?;
    tracing::info!(count = numbers.len(), "Processing merged pull requests");

    let mut classified = Vec::with_capacity(numbers.len());
    for number in numbers {
        let pr = match source.get_pull_request(number).await {
            Ok(pr) => pr,
            Err(e) => {
                tracing::warn!(pr = number, error = %e, "Failed to fetch merged PR, skipping");
                report.push(
                    ReportBucket::MergedUncategorized,
                    ReportRow::new(number, "", MERGED, format!("Processing failed: {e}")),
                );
                summary.merged_failed += 1;
                continue;
            }
        };

        let classification = tabulate_one(&pr, report, summary);
        classified.push((number, classification));
    }

    Ok(classified)
}

fn tabulate_one<R: ReportSink>(
    pr: &PullRequest,
    report: &mut R,
    summary: &mut Summary,
) -> MergedClassification {
    let classification = bucket_merged(&pr.labels);
    let merged_as = pr
        .merge_commit_sha
        .as_deref()
        .map(|sha| format!("Merged as {}", sha.get(..10).unwrap_or(sha)))
        .unwrap_or_default();
    let row = |kind: &str, result: &str| ReportRow::new(pr.number, &pr.title, kind, result);

    if classification.feature {
        tracing::debug!(pr = pr.number, "Found PR with feature label");
        report.push(
            ReportBucket::MergedFeatures,
            row(TypeCategory::NewFeature.label_name(), &merged_as),
        );
        summary.merged_features += 1;
    }
    if classification.fix {
        tracing::debug!(pr = pr.number, "Found PR with bug or cleanup label");
        let kind = if pr.has_label(TypeCategory::Bug.label_name()) {
            TypeCategory::Bug.label_name()
        } else {
            TypeCategory::Cleanup.label_name()
        };
        report.push(ReportBucket::MergedFixes, row(kind, &merged_as));
        summary.merged_fixes += 1;
    }
    if classification.enhancement {
        tracing::debug!(pr = pr.number, "Found PR with enhancement label");
        report.push(
            ReportBucket::MergedEnhancements,
            row(TypeCategory::Enhancement.label_name(), &merged_as),
        );
        summary.merged_enhancements += 1;
    }
    if classification.is_anomalous() {
        tracing::info!(
            pr = pr.number,
            reasons = %classification.anomaly_summary(),
            "Merged PR could not be categorized"
        );
        report.push(
            ReportBucket::MergedUncategorized,
            row(MERGED, &classification.anomaly_summary()),
        );
        summary.merged_uncategorized += 1;
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{pr, InMemoryPlatform};
    use crate::reconcile::AnomalyReason;
    use crate::report::TableReport;

    fn since() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_buckets_and_double_booking() {
        let platform = InMemoryPlatform::new()
            .with_merged(pr(1, None, false, &["type:new-feature"]))
            .with_merged(pr(2, None, false, &["type:new-feature", "type:bug"]))
            .with_merged(pr(3, None, false, &["type:cleanup"]))
            .with_merged(pr(4, None, false, &["type:enhancement"]))
            .with_merged(pr(5, None, false, &[]))
            .with_merged(pr(6, None, false, &["component:ui"]));
        let mut report = TableReport::new("owner/repo", "tag v1", 60, "unused.txt");
        let mut summary = Summary::default();

        let classified = tabulate_merged(&platform, since(), &mut report, &mut summary)
            .await
            .unwrap();

        assert_eq!(classified.len(), 6);
        assert_eq!(summary.merged_features, 2);
        assert_eq!(summary.merged_fixes, 2);
        assert_eq!(summary.merged_enhancements, 1);
        assert_eq!(summary.merged_uncategorized, 3);

        let fixes = report.rows(ReportBucket::MergedFixes);
        assert_eq!(fixes[0].number, 2);
        assert_eq!(fixes[0].kind, "type:bug");
        assert_eq!(fixes[1].kind, "type:cleanup");
        assert!(fixes[0].result.starts_with("Merged as 0000000000"));

        let uncategorized: Vec<_> = report
            .rows(ReportBucket::MergedUncategorized)
            .iter()
            .map(|r| (r.number, r.result.as_str()))
            .collect();
        assert_eq!(
            uncategorized,
            vec![
                (2, "Too many labels"),
                (5, "No labels; No label match"),
                (6, "No label match"),
            ]
        );
        assert_eq!(classified[1].1.anomalies, vec![AnomalyReason::TooManyLabels]);
    }

    #[tokio::test]
    async fn test_broken_merged_pr_is_recorded() {
        let platform = InMemoryPlatform::new()
            .with_broken(7, true)
            .with_merged(pr(8, None, false, &["type:bug"]));
        let mut report = TableReport::new("owner/repo", "tag v1", 60, "unused.txt");
        let mut summary = Summary::default();

        let classified = tabulate_merged(&platform, since(), &mut report, &mut summary)
            .await
            .unwrap();

        assert_eq!(classified.len(), 1);
        assert_eq!(summary.merged_failed, 1);
        assert_eq!(summary.merged_fixes, 1);
        let rows = report.rows(ReportBucket::MergedUncategorized);
        assert!(rows[0].result.starts_with("Processing failed: "));
    }
}
