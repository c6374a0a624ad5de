use async_trait::async_trait;
use chrono::NaiveDate;
use octocrab::Octocrab;

use crate::config::GitHubConfig;
use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::{LabelMutator, PullRequestSource};

use super::mapper;

/// GitHub-backed platform scoped to one repository and branch.
pub struct GitHubPlatform {
    client: Octocrab,
    owner: String,
    repo: String,
    branch: String,
}

impl GitHubPlatform {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let (owner, repo) = Self::parse_repo(&config.repo)?;

        let client = Octocrab::builder()
            .personal_token(config.token.clone())
            .build()
            .map_err(|e| AppError::GitHubApi(format!("Failed to build octocrab client: {e}")))?;

        Ok(Self {
            client,
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: config.branch.clone(),
        })
    }

    fn parse_repo(repo_full_name: &str) -> Result<(&str, &str)> {
        match repo_full_name.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok((owner, repo)),
            _ => Err(AppError::GitHubApi(format!(
                "Invalid repo name: {repo_full_name}"
            ))),
        }
    }

    fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Run an issue search and return the matching issue numbers.
    async fn search_numbers(&self, query: &str) -> Result<Vec<u64>> {
        tracing::debug!(query = %query, "Searching pull requests");

        let page = self
            .client
            .search()
            .issues_and_pull_requests(query)
            .per_page(100)
            .send()
            .await?;

        let issues = self.client.all_pages(page).await?;
        Ok(issues.into_iter().map(|issue| issue.number).collect())
    }
}

/// Search query for the open-PR phase.
pub fn open_query(repo_full_name: &str) -> String {
    format!("repo:{repo_full_name} is:pr is:open")
}

/// Search query for the merged-PR phase.
pub fn merged_query(repo_full_name: &str, branch: &str, since: NaiveDate) -> String {
    format!(
        "repo:{repo_full_name} is:pr is:merged base:{branch} merged:>={}",
        since.format("%Y-%m-%d")
    )
}

#[async_trait]
impl PullRequestSource for GitHubPlatform {
    async fn open_pull_requests(&self) -> Result<Vec<u64>> {
        self.search_numbers(&open_query(&self.full_name())).await
    }

    async fn merged_pull_requests_since(&self, since: NaiveDate) -> Result<Vec<u64>> {
        self.search_numbers(&merged_query(&self.full_name(), &self.branch, since))
            .await
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        let pr = self
            .client
            .pulls(&self.owner, &self.repo)
            .get(number)
            .await?;

        mapper::map_pull_request(pr)
    }

    async fn reference_date(&self, reference: &ReleaseReference) -> Result<NaiveDate> {
        // The commits endpoint resolves both SHAs and tag names
        let url = format!(
            "/repos/{}/{}/commits/{}",
            self.owner,
            self.repo,
            reference.as_ref_name()
        );
        let commit: serde_json::Value = self
            .client
            .get(&url, None::<&()>)
            .await
            .map_err(|e| AppError::Reference(format!("Failed to resolve {reference}: {e}")))?;

        mapper::map_commit_date(&commit)
            .ok_or_else(|| AppError::Reference(format!("No author date on {reference}")))
    }
}

#[async_trait]
impl LabelMutator for GitHubPlatform {
    async fn add_label(&self, pr_number: u64, label: &str) -> Result<()> {
        self.client
            .issues(&self.owner, &self.repo)
            .add_labels(pr_number, &[label.to_string()])
            .await?;

        Ok(())
    }

    async fn remove_label(&self, pr_number: u64, label: &str) -> Result<()> {
        // Label names carry ':' and spaces, so encode the path segment
        let url = format!(
            "/repos/{}/{}/issues/{pr_number}/labels/{}",
            self.owner,
            self.repo,
            urlencoding::encode(label)
        );
        let result: std::result::Result<serde_json::Value, octocrab::Error> =
            self.client.delete(&url, None::<&()>).await;

        match result {
            Ok(_) => Ok(()),
            // Already gone
            Err(octocrab::Error::GitHub { source, .. }) if source.status_code.as_u16() == 404 => {
                tracing::debug!(pr = pr_number, label = %label, "Label already absent");
                Ok(())
            }
            Err(e) => Err(AppError::GitHubApi(format!("Failed to remove label: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo() {
        assert_eq!(
            GitHubPlatform::parse_repo("apache/cloudstack").unwrap(),
            ("apache", "cloudstack")
        );
        assert!(GitHubPlatform::parse_repo("cloudstack").is_err());
        assert!(GitHubPlatform::parse_repo("/cloudstack").is_err());
    }

    #[test]
    fn test_search_queries() {
        assert_eq!(
            open_query("apache/cloudstack"),
            "repo:apache/cloudstack is:pr is:open"
        );
        let since = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            merged_query("apache/cloudstack", "main", since),
            "repo:apache/cloudstack is:pr is:merged base:main merged:>=2024-03-07"
        );
    }
}
