//! Arguments shared by `scan` and `archive`.

use anyhow::{ensure, Context, Result};
use clap::Args;

use archiver_core::{config, ArchiverConfig, Namespace, TargetKind};
use archiver_github::GitHubClient;

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// GitHub personal access token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GitHub user or organization whose repositories are examined.
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub target: String,

    /// Treat the target as an organization.
    #[arg(long)]
    pub org: bool,

    /// Inactivity threshold in years (overrides config).
    #[arg(long, value_name = "YEARS")]
    pub threshold: Option<u32>,

    /// Continue past remote errors instead of aborting. Can delete an original
    /// repository even when its fork failed.
    #[arg(long)]
    pub force: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl TargetArgs {
    /// File config with command-line overrides applied.
    pub fn config(&self) -> Result<ArchiverConfig> {
        let mut cfg = config::load().context("failed to load ~/.repo-archiver/config.yaml")?;
        if let Some(years) = self.threshold {
            cfg.threshold_years = years;
        }
        if self.force {
            cfg.force = true;
        }
        cfg.validate().context("invalid configuration")?;
        tracing::debug!(?cfg, "effective configuration");
        Ok(cfg)
    }

    pub fn client(&self, cfg: &ArchiverConfig) -> Result<GitHubClient> {
        ensure!(!self.token.trim().is_empty(), "--token must not be empty");
        Ok(GitHubClient::with_base_url(self.token.trim(), &cfg.api_url))
    }

    pub fn namespace(&self) -> Namespace {
        Namespace::from(self.target.as_str())
    }

    pub fn kind(&self) -> TargetKind {
        if self.org {
            TargetKind::Organization
        } else {
            TargetKind::User
        }
    }
}
