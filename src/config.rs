use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::platform::types::ReleaseReference;

/// Validated configuration for a single reconciliation run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github: GitHubConfig,
    pub release: ReleaseReference,
    pub report: ReportConfig,
    /// `false` means dry run: every action is computed and reported but no
    /// label is touched on GitHub.
    pub apply: bool,
    pub wip_label: String,
}

#[derive(Clone)]
pub struct GitHubConfig {
    /// Repository in `owner/name` form.
    pub repo: String,
    pub token: String,
    pub branch: String,
}

// Manual Debug impl to avoid leaking the token
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("repo", &self.repo)
            .field("token", &"[REDACTED]")
            .field("branch", &self.branch)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_path: PathBuf,
    pub title_width: u16,
}

/// Values supplied on the command line. They take priority over the
/// environment and the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub repo: Option<String>,
    pub token: Option<String>,
    pub branch: Option<String>,
    pub prev_release_commit: Option<String>,
    pub prev_release_version: Option<String>,
    pub output_path: Option<String>,
    pub title_width: Option<u16>,
    pub wip_label: Option<String>,
    pub apply: Option<bool>,
}

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    github: RawGitHubConfig,
    #[serde(default)]
    release: RawReleaseConfig,
    #[serde(default)]
    report: RawReportConfig,
    apply: Option<bool>,
    wip_label: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawGitHubConfig {
    repo: Option<String>,
    token: Option<String>,
    branch: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawReleaseConfig {
    prev_release_commit: Option<String>,
    prev_release_version: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawReportConfig {
    output_path: Option<PathBuf>,
    title_width: Option<u16>,
}

fn default_wip_label() -> String {
    "status:work-in-progress".to_string()
}

/// Treat empty and whitespace-only strings the same as a missing value.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require<T>(value: Option<T>, key: &str, problems: &mut Vec<String>) -> Option<T> {
    if value.is_none() {
        problems.push(format!("{key} is required"));
    }
    value
}

impl RawConfig {
    fn validate(self) -> Result<AppConfig> {
        let mut problems = Vec::new();

        let repo = require(non_empty(self.github.repo), "github.repo", &mut problems);
        if let Some(repo) = &repo {
            let valid = matches!(repo.split_once('/'), Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/'));
            if !valid {
                problems.push(format!("github.repo must be in owner/name form, got: {repo}"));
            }
        }
        let token = require(non_empty(self.github.token), "github.token", &mut problems);
        let branch = require(non_empty(self.github.branch), "github.branch", &mut problems);

        // A commit SHA wins over a version tag when both are present
        let release = match (
            non_empty(self.release.prev_release_commit),
            non_empty(self.release.prev_release_version),
        ) {
            (Some(sha), _) => Some(ReleaseReference::Commit(sha)),
            (None, Some(tag)) => Some(ReleaseReference::Tag(tag)),
            (None, None) => {
                problems.push(
                    "release.prev_release_commit or release.prev_release_version is required"
                        .to_string(),
                );
                None
            }
        };

        let output_path = require(
            self.report
                .output_path
                .filter(|p| !p.as_os_str().is_empty()),
            "report.output_path",
            &mut problems,
        );
        let title_width = require(self.report.title_width, "report.title_width", &mut problems);
        if title_width == Some(0) {
            problems.push("report.title_width must be greater than zero".to_string());
        }
        let apply = require(self.apply, "apply", &mut problems);

        match (repo, token, branch, release, output_path, title_width, apply) {
            (
                Some(repo),
                Some(token),
                Some(branch),
                Some(release),
                Some(output_path),
                Some(title_width),
                Some(apply),
            ) if problems.is_empty() => Ok(AppConfig {
                github: GitHubConfig {
                    repo,
                    token,
                    branch,
                },
                release,
                report: ReportConfig {
                    output_path,
                    title_width,
                },
                apply,
                wip_label: non_empty(self.wip_label).unwrap_or_else(default_wip_label),
            }),
            _ => Err(AppError::Config(problems.join("; "))),
        }
    }
}

impl AppConfig {
    pub fn load(config_path: Option<&str>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            // Try default paths
            builder = builder.add_source(
                config::File::with_name("label-reconciler").required(false),
            );
        }

        // Environment variable overrides with LABEL_RECONCILER__ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("LABEL_RECONCILER")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(apply_overrides(builder, overrides)?)
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let raw: RawConfig = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        raw.validate()
    }
}

fn apply_overrides(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    overrides: &ConfigOverrides,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(builder
        .set_override_option("github.repo", overrides.repo.clone())?
        .set_override_option("github.token", overrides.token.clone())?
        .set_override_option("github.branch", overrides.branch.clone())?
        .set_override_option(
            "release.prev_release_commit",
            overrides.prev_release_commit.clone(),
        )?
        .set_override_option(
            "release.prev_release_version",
            overrides.prev_release_version.clone(),
        )?
        .set_override_option("report.output_path", overrides.output_path.clone())?
        .set_override_option(
            "report.title_width",
            overrides.title_width.map(i64::from),
        )?
        .set_override_option("wip_label", overrides.wip_label.clone())?
        .set_override_option("apply", overrides.apply)?)
}
