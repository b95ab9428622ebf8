//! `repo-archiver scan` — classify without changing anything.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use archiver_lifecycle::{pipeline, RunRequest, ThreadPacer};

use super::report;
use super::target::TargetArgs;

/// Arguments for `repo-archiver scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

impl ScanArgs {
    pub fn run(self) -> Result<()> {
        let cfg = self.target.config()?;
        let client = self.target.client(&cfg)?;
        let request = RunRequest {
            target: self.target.namespace(),
            kind: self.target.kind(),
            dry_run: true,
            archive_namespace: None,
        };

        let now = Utc::now();
        let result = pipeline::run(&client, &cfg, &request, now, &ThreadPacer)
            .with_context(|| format!("scan failed for '{}'", self.target.target))?;

        if self.target.json {
            return report::print_json(&result, now);
        }
        report::print_inactive(&result, cfg.threshold_years, now);
        Ok(())
    }
}
