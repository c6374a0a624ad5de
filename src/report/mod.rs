//! Report accumulation and the fixed-width text rendering written at the end of a run.

mod table;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

pub use table::bucket_table;

/// Named report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportBucket {
    OpenAdded,
    OpenMismatched,
    OpenUncategorized,
    MergedFeatures,
    MergedFixes,
    MergedEnhancements,
    MergedUncategorized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub number: u64,
    pub title: String,
    /// Free-form "PR Type" column: draft state, categories involved, or `MERGED`.
    pub kind: String,
    pub result: String,
}

impl ReportRow {
    pub fn new(
        number: u64,
        title: impl Into<String>,
        kind: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            kind: kind.into(),
            result: result.into(),
        }
    }
}

/// Run counters printed alongside the tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub open_matched: usize,
    pub open_updated: usize,
    pub open_mismatched: usize,
    pub open_uncategorized: usize,
    pub open_failed: usize,
    pub merged_features: usize,
    pub merged_fixes: usize,
    pub merged_enhancements: usize,
    pub merged_uncategorized: usize,
    pub merged_failed: usize,
}

/// Destination for report rows.
pub trait ReportSink {
    fn push(&mut self, bucket: ReportBucket, row: ReportRow);

    /// Flush everything accumulated so far together with the final counters.
    fn finish(&mut self, summary: &Summary) -> Result<()>;
}

/// Report rendered as plain-text tables into a single file.
pub struct TableReport {
    repo: String,
    reference: String,
    title_width: u16,
    output_path: PathBuf,
    rows: BTreeMap<ReportBucket, Vec<ReportRow>>,
}

impl TableReport {
    pub fn new(
        repo: impl Into<String>,
        reference: impl Into<String>,
        title_width: u16,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repo: repo.into(),
            reference: reference.into(),
            title_width,
            output_path: output_path.into(),
            rows: BTreeMap::new(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Rows of a bucket in insertion order.
    pub fn rows(&self, bucket: ReportBucket) -> &[ReportRow] {
        self.rows.get(&bucket).map(Vec::as_slice).unwrap_or_default()
    }

    fn section(&self, out: &mut String, heading: &str, bucket: ReportBucket, footer: String) {
        out.push_str(heading);
        out.push_str("\n\n");

        let mut rows = self.rows(bucket).to_vec();
        // API ordering is not stable; sort so reruns diff cleanly
        rows.sort_by_key(|r| r.number);

        if rows.is_empty() {
            out.push_str("(none)");
        } else {
            out.push_str(&bucket_table(&rows, self.title_width).to_string());
        }
        out.push('\n');
        out.push_str(&footer);
        out.push_str("\n\n\n");
    }

    /// Render the full report.
    pub fn render(&self, summary: &Summary) -> String {
        let title = format!("Results of {} open PR label trawling", self.repo);
        let mut out = String::new();
        out.push_str(&title);
        out.push('\n');
        out.push_str(&"=".repeat(title.len()));
        out.push_str(&format!("\n\n{} PR labels matched\n\n\n", summary.open_matched));

        self.section(
            &mut out,
            "Labels updated in PRs:",
            ReportBucket::OpenAdded,
            format!("{} PRs updated", summary.open_updated),
        );
        self.section(
            &mut out,
            "PRs with label not matching description:",
            ReportBucket::OpenMismatched,
            format!("{} PRs found", summary.open_mismatched),
        );
        self.section(
            &mut out,
            "PRs without label or description:",
            ReportBucket::OpenUncategorized,
            with_failures(
                format!("{} unmatched PRs", summary.open_uncategorized),
                summary.open_failed,
            ),
        );

        let merged_title = format!("Merged PRs since {}", self.reference);
        out.push_str(&merged_title);
        out.push('\n');
        out.push_str(&"=".repeat(merged_title.len()));
        out.push_str("\n\n");

        self.section(
            &mut out,
            "Features:",
            ReportBucket::MergedFeatures,
            format!("{} features", summary.merged_features),
        );
        self.section(
            &mut out,
            "Fixes:",
            ReportBucket::MergedFixes,
            format!("{} fixes", summary.merged_fixes),
        );
        self.section(
            &mut out,
            "Enhancements:",
            ReportBucket::MergedEnhancements,
            format!("{} enhancements", summary.merged_enhancements),
        );
        self.section(
            &mut out,
            "Uncategorized merged PRs:",
            ReportBucket::MergedUncategorized,
            with_failures(
                format!("{} uncategorized", summary.merged_uncategorized),
                summary.merged_failed,
            ),
        );

        out
    }
}

/// Failed PRs share the uncategorized table, so the footer counts them too.
fn with_failures(footer: String, failed: usize) -> String {
    if failed == 0 {
        footer
    } else {
        format!("{footer}, {failed} could not be processed")
    }
}

impl ReportSink for TableReport {
    fn push(&mut self, bucket: ReportBucket, row: ReportRow) {
        self.rows.entry(bucket).or_default().push(row);
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.output_path, self.render(summary)).map_err(|e| {
            AppError::Report(format!(
                "Failed to write report to {}: {e}",
                self.output_path.display()
            ))
        })?;

        tracing::info!(path = %self.output_path.display(), "Report written");
        Ok(())
    }
}
