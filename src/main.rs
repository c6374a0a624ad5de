use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use label_reconciler::config::{AppConfig, ConfigOverrides};
use label_reconciler::platform::github::GitHubPlatform;
use label_reconciler::report::TableReport;
use label_reconciler::workflow;

#[derive(Parser)]
#[command(
    name = "label-reconciler",
    about = "Reconcile PR type labels with description checklists and tabulate merged PRs"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Repository in owner/name form
    #[arg(long)]
    repo: Option<String>,

    /// GitHub token with repo or public_repo scope
    #[arg(short, long)]
    token: Option<String>,

    /// Branch merged PRs must target
    #[arg(short, long)]
    branch: Option<String>,

    /// Commit SHA of the previous release
    #[arg(long)]
    prev_release_commit: Option<String>,

    /// Version tag of the previous release, used when no commit is given
    #[arg(long)]
    prev_release_version: Option<String>,

    /// Report file path
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum width of the title column
    #[arg(long)]
    title_width: Option<u16>,

    /// Label kept in sync with the draft flag
    #[arg(long)]
    wip_label: Option<String>,

    /// Apply label changes on GitHub
    #[arg(long, conflicts_with = "dry_run")]
    apply: bool,

    /// Only report label changes
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        let apply = match (self.apply, self.dry_run) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };

        ConfigOverrides {
            repo: self.repo.clone(),
            token: self.token.clone(),
            branch: self.branch.clone(),
            prev_release_commit: self.prev_release_commit.clone(),
            prev_release_version: self.prev_release_version.clone(),
            output_path: self.output.clone(),
            title_width: self.title_width,
            wip_label: self.wip_label.clone(),
            apply,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref(), &cli.overrides())?;

    tracing::info!(
        repo = %config.github.repo,
        branch = %config.github.branch,
        reference = %config.release,
        apply = config.apply,
        "Starting label reconciliation"
    );

    let platform = GitHubPlatform::new(&config.github)?;
    let mut report = TableReport::new(
        &config.github.repo,
        config.release.to_string(),
        config.report.title_width,
        config.report.output_path.clone(),
    );

    let summary = workflow::run(&platform, &config, &mut report).await?;

    println!("{}", report.render(&summary));
    tracing::info!(path = %report.output_path().display(), "Table has been written");

    Ok(())
}
