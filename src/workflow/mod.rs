pub mod merged;
pub mod open;
pub mod types;

use crate::config::AppConfig;
use crate::error::Result;
use crate::platform::{LabelMutator, PullRequestSource};
use crate::report::{ReportSink, Summary};

use types::RunOptions;

/// Run both phases and flush the report.
///
/// The release reference is resolved before any PR is touched, so a bad
/// reference fails the run without partial output.
pub async fn run<P, R>(platform: &P, config: &AppConfig, report: &mut R) -> Result<Summary>
where
    P: PullRequestSource + LabelMutator,
    R: ReportSink,
{
    let since = platform.reference_date(&config.release).await?;
    tracing::info!(reference = %config.release, since = %since, "Resolved previous release");

    let options = RunOptions {
        apply: config.apply,
        wip_label: config.wip_label.clone(),
    };
    if !options.apply {
        tracing::info!("Dry run: label changes will be reported but not applied");
    }

    let mut summary = Summary::default();
    open::reconcile_open(platform, &options, report, &mut summary).await?;
    merged::tabulate_merged(platform, since, report, &mut summary).await?;

    report.finish(&summary)?;

    tracing::info!(
        matched = summary.open_matched,
        updated = summary.open_updated,
        mismatched = summary.open_mismatched,
        uncategorized = summary.open_uncategorized,
        failed = summary.open_failed + summary.merged_failed,
        "Reconciliation complete"
    );

    Ok(summary)
}
