use crate::error::Result;
use crate::labels::TypeCategory;
use crate::platform::types::PullRequest;
use crate::platform::{LabelMutator, PullRequestSource};
use crate::reconcile::{self, LabelMutation, Reconciliation, Verdict};
use crate::report::{ReportBucket, ReportRow, ReportSink, Summary};
use crate::workflow::types::{MutationOutcome, MutationStatus, OpenPrOutcome, RunOptions};

/// Reconcile every open PR. A failing PR is reported and skipped; only a
/// failure to enumerate open PRs aborts the phase.
pub async fn reconcile_open<P, R>(
    platform: &P,
    options: &RunOptions,
    report: &mut R,
    summary: &mut Summary,
) -> Result<Vec<OpenPrOutcome>>
where
    P: PullRequestSource + LabelMutator,
    R: ReportSink,
{
    tracing::info!("Retrieving open pull requests");
    let numbers = platform.open_pull_requests().await?;
    tracing::info!(count = numbers.len(), "Processing open pull requests");

    let mut outcomes = Vec::with_capacity(numbers.len());
    for number in numbers {
        let pr = match platform.get_pull_request(number).await {
            Ok(pr) => pr,
            Err(e) => {
                tracing::warn!(pr = number, error = %e, "Failed to fetch open PR, skipping");
                report.push(
                    ReportBucket::OpenUncategorized,
                    ReportRow::new(number, "", "PR", format!("Processing failed: {e}")),
                );
                summary.open_failed += 1;
                outcomes.push(OpenPrOutcome::Failed {
                    number,
                    error: e.to_string(),
                });
                continue;
            }
        };

        outcomes.push(reconcile_one(platform, &pr, options, report, summary).await);
    }

    Ok(outcomes)
}

/// Draft toggle then type-label reconciliation for a single PR.
pub async fn reconcile_one<M, R>(
    mutator: &M,
    pr: &PullRequest,
    options: &RunOptions,
    report: &mut R,
    summary: &mut Summary,
) -> OpenPrOutcome
where
    M: LabelMutator,
    R: ReportSink,
{
    tracing::debug!(pr = pr.number, draft = pr.draft, "Checking open PR");
    let kind = if pr.draft { "Draft PR" } else { "PR" };
    let mut mutations = Vec::new();

    if let Some(mutation) = reconcile::draft_toggle(pr.draft, &pr.labels, &options.wip_label) {
        tracing::info!(
            pr = pr.number,
            change = %mutation,
            "Work-in-progress label out of sync with draft state"
        );
        let outcome = send(mutator, pr.number, mutation, options.apply).await;
        report.push(
            ReportBucket::OpenAdded,
            ReportRow::new(pr.number, &pr.title, kind, outcome.describe()),
        );
        summary.open_updated += 1;
        mutations.push(outcome);
    }

    let rec = reconcile::reconcile_pull_request(pr);
    let row = |result: String| ReportRow::new(pr.number, &pr.title, kind, result);

    match rec.verdict {
        Verdict::Ok => {
            tracing::info!(pr = pr.number, "Matching type label found, no action");
            summary.open_matched += 1;
        }
        Verdict::Ambiguous => {
            tracing::info!(pr = pr.number, "Too many label or description matches");
            report.push(
                ReportBucket::OpenMismatched,
                row(with_details("Label/description mismatch (too many matches)", &rec)),
            );
            summary.open_mismatched += 1;
        }
        Verdict::Mismatch => {
            tracing::info!(pr = pr.number, "Label and description don't match");
            report.push(
                ReportBucket::OpenMismatched,
                row(with_details("Label/description mismatch", &rec)),
            );
            summary.open_mismatched += 1;
        }
        Verdict::LabelWithoutDescription => {
            tracing::info!(pr = pr.number, "Label without description");
            report.push(
                ReportBucket::OpenMismatched,
                row(with_details("Label without description", &rec)),
            );
            summary.open_mismatched += 1;
        }
        Verdict::AddLabel(category) => {
            for mutation in rec.mutations() {
                let outcome = send(mutator, pr.number, mutation, options.apply).await;
                report.push(
                    ReportBucket::OpenAdded,
                    ReportRow::new(
                        pr.number,
                        &pr.title,
                        category.label_name(),
                        outcome.describe(),
                    ),
                );
                mutations.push(outcome);
            }
            summary.open_updated += 1;
        }
        Verdict::Uncategorized => {
            tracing::info!(pr = pr.number, "No type label or type in description");
            report.push(
                ReportBucket::OpenUncategorized,
                row("No label or description".to_string()),
            );
            summary.open_uncategorized += 1;
        }
        Verdict::Indeterminate => {
            tracing::error!(pr = pr.number, tally = ?rec.tally, "Verdict rules fell through");
            report.push(
                ReportBucket::OpenUncategorized,
                row(with_details("Internal inconsistency: unable to classify", &rec)),
            );
            summary.open_uncategorized += 1;
        }
    }

    OpenPrOutcome::Reconciled {
        number: pr.number,
        verdict: rec.verdict,
        mutations,
    }
}

/// Send a mutation unless this is a dry run. Failures are logged and
/// returned, never propagated.
async fn send<M: LabelMutator>(
    mutator: &M,
    pr_number: u64,
    mutation: LabelMutation,
    apply: bool,
) -> MutationOutcome {
    if !apply {
        return MutationOutcome {
            mutation,
            status: MutationStatus::Skipped,
        };
    }

    let result = match &mutation {
        LabelMutation::Add(label) => mutator.add_label(pr_number, label).await,
        LabelMutation::Remove(label) => mutator.remove_label(pr_number, label).await,
    };

    let status = match result {
        Ok(()) => MutationStatus::Applied,
        Err(e) => {
            tracing::warn!(pr = pr_number, change = %mutation, error = %e, "Label update failed");
            MutationStatus::Failed {
                error: e.to_string(),
            }
        }
    };

    MutationOutcome { mutation, status }
}

fn join_labels(categories: &[TypeCategory]) -> String {
    categories
        .iter()
        .map(|c| c.label_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append which boxes are checked and which type labels are present.
fn with_details(headline: &str, rec: &Reconciliation) -> String {
    let mut text = headline.to_string();
    let checked = rec.checked_categories();
    if !checked.is_empty() {
        text.push_str(&format!("; checked: {}", join_labels(&checked)));
    }
    let labelled = rec.labelled_categories();
    if !labelled.is_empty() {
        text.push_str(&format!("; labels: {}", join_labels(&labelled)));
    }
    if !rec.tally.incorrect.is_empty() {
        text.push_str(&format!("; unchecked: {}", join_labels(&rec.tally.incorrect)));
    }
    text
}
