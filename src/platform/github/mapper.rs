use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::platform::types;

/// Map an octocrab pull request to our platform type.
///
/// A pull request without a title is treated as a malformed record.
pub fn map_pull_request(pr: octocrab::models::pulls::PullRequest) -> Result<types::PullRequest> {
    let title = pr
        .title
        .map(|t| t.trim().to_string())
        .ok_or_else(|| AppError::MalformedPullRequest {
            number: pr.number,
            reason: "missing title".to_string(),
        })?;

    Ok(types::PullRequest {
        number: pr.number,
        title,
        body: pr.body,
        draft: pr.draft.unwrap_or(false),
        labels: pr
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.name)
            .collect(),
        merge_commit_sha: pr.merge_commit_sha,
    })
}

/// Extract the author date from a `GET /repos/{owner}/{repo}/commits/{ref}` response.
pub fn map_commit_date(commit: &serde_json::Value) -> Option<NaiveDate> {
    commit["commit"]["author"]["date"]
        .as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_commit_date() {
        let commit = serde_json::json!({
            "sha": "abc123",
            "commit": { "author": { "name": "dev", "date": "2024-03-07T12:34:56Z" } }
        });
        assert_eq!(
            map_commit_date(&commit),
            NaiveDate::from_ymd_opt(2024, 3, 7)
        );
    }

    #[test]
    fn test_map_commit_date_missing() {
        let commit = serde_json::json!({ "sha": "abc123", "commit": {} });
        assert_eq!(map_commit_date(&commit), None);
    }
}
