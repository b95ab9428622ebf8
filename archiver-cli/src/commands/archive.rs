//! `repo-archiver archive` — run the full archive pipeline.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;

use archiver_core::Namespace;
use archiver_lifecycle::{pipeline, RunRequest, ThreadPacer};

use super::report;
use super::target::TargetArgs;

/// Arguments for `repo-archiver archive`.
#[derive(Args, Debug)]
pub struct ArchiveArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Report what would be archived without making changes.
    #[arg(long)]
    pub dry_run: bool,

    /// Archive namespace (defaults to `<target><archive_suffix>`). Must already
    /// exist as an organization or user.
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub namespace: Option<String>,
}

impl ArchiveArgs {
    pub fn run(self) -> Result<()> {
        let cfg = self.target.config()?;
        let client = self.target.client(&cfg)?;
        let request = RunRequest {
            target: self.target.namespace(),
            kind: self.target.kind(),
            dry_run: self.dry_run,
            archive_namespace: self.namespace.as_deref().map(Namespace::from),
        };

        if cfg.force && !self.dry_run {
            eprintln!(
                "{} force mode: remote errors are ignored; an original may be deleted even if its fork failed",
                "warning:".yellow().bold()
            );
        }

        let now = Utc::now();
        let result = pipeline::run(&client, &cfg, &request, now, &ThreadPacer)
            .with_context(|| format!("archive run failed for '{}'", self.target.target))?;

        if self.target.json {
            return report::print_json(&result, now);
        }

        report::print_inactive(&result, cfg.threshold_years, now);
        if result.dry_run {
            println!("[dry-run] no changes were made.");
            return Ok(());
        }
        report::print_archived(&result.archived);
        if !result.inactive.is_empty() {
            let complete = result
                .archived
                .iter()
                .filter(|outcome| outcome.state.is_terminal())
                .count();
            println!(
                "{} {} repositories archived to {}",
                "✓".green(),
                complete,
                result.archive_namespace
            );
            let incomplete = result.archived.len() - complete;
            if incomplete > 0 {
                println!(
                    "{} {incomplete} repositories did not finish archiving",
                    "!".yellow().bold()
                );
            }
        }
        Ok(())
    }
}
