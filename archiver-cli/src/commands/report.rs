//! Human and JSON rendering of a [`RunReport`].

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use archiver_lifecycle::{ArchiveOutcome, ForkDisposition, RunReport};

#[derive(Serialize)]
struct RunReportJson {
    target: String,
    archive_namespace: String,
    dry_run: bool,
    listed: usize,
    inactive: Vec<InactiveJson>,
    archived: Vec<ArchivedJson>,
}

#[derive(Serialize)]
struct InactiveJson {
    repository: String,
    last_activity: String,
    idle_days: i64,
}

#[derive(Serialize)]
struct ArchivedJson {
    repository: String,
    archived_as: String,
    fork: &'static str,
    state: String,
    suppressed: Vec<SuppressedJson>,
}

#[derive(Serialize)]
struct SuppressedJson {
    step: String,
    error: String,
}

#[derive(Tabled)]
struct InactiveRow {
    #[tabled(rename = "repository")]
    repository: String,
    #[tabled(rename = "last activity")]
    last_activity: String,
    #[tabled(rename = "idle")]
    idle: String,
}

#[derive(Tabled)]
struct ArchivedRow {
    #[tabled(rename = "repository")]
    repository: String,
    #[tabled(rename = "archived as")]
    archived_as: String,
    #[tabled(rename = "fork")]
    fork: &'static str,
    #[tabled(rename = "status")]
    status: String,
}

pub fn print_json(report: &RunReport, now: DateTime<Utc>) -> Result<()> {
    let payload = RunReportJson {
        target: report.target.to_string(),
        archive_namespace: report.archive_namespace.to_string(),
        dry_run: report.dry_run,
        listed: report.listed,
        inactive: report
            .inactive
            .iter()
            .map(|repo| InactiveJson {
                repository: repo.full_name(),
                last_activity: repo.last_activity.to_rfc3339(),
                idle_days: idle_days(repo.last_activity, now),
            })
            .collect(),
        archived: report
            .archived
            .iter()
            .map(|outcome| ArchivedJson {
                repository: outcome.repo.clone(),
                archived_as: outcome.archived_as.clone(),
                fork: fork_key(outcome.fork),
                state: outcome.state.to_string(),
                suppressed: outcome
                    .suppressed
                    .iter()
                    .map(|s| SuppressedJson {
                        step: s.step.to_string(),
                        error: s.message.clone(),
                    })
                    .collect(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize report JSON")?
    );
    Ok(())
}

pub fn print_inactive(report: &RunReport, threshold_years: u32, now: DateTime<Utc>) {
    println!(
        "{} | {} repositories | {} inactive for {threshold_years}+ years",
        report.target.to_string().bold(),
        report.listed,
        report.inactive.len(),
    );
    if report.inactive.is_empty() {
        println!("No inactive repositories found.");
        return;
    }

    let rows: Vec<InactiveRow> = report
        .inactive
        .iter()
        .map(|repo| InactiveRow {
            repository: repo.full_name(),
            last_activity: repo.last_activity.format("%Y-%m-%d").to_string(),
            idle: format!("{}d", idle_days(repo.last_activity, now)),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

pub fn print_archived(outcomes: &[ArchiveOutcome]) {
    if outcomes.is_empty() {
        return;
    }
    let rows: Vec<ArchivedRow> = outcomes
        .iter()
        .map(|outcome| ArchivedRow {
            repository: outcome.repo.clone(),
            archived_as: outcome.archived_as.clone(),
            fork: fork_key(outcome.fork),
            status: outcome_status(outcome),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    for outcome in outcomes {
        for failure in &outcome.suppressed {
            println!(
                "{} {}: {} failed and was ignored: {}",
                "!".yellow().bold(),
                outcome.repo,
                failure.step,
                failure.message
            );
        }
    }
}

fn outcome_status(outcome: &ArchiveOutcome) -> String {
    if outcome.is_clean() {
        "archived".green().to_string()
    } else {
        format!(
            "stopped at {}, {} ignored error(s)",
            outcome.state,
            outcome.suppressed.len()
        )
        .yellow()
        .to_string()
    }
}

fn fork_key(fork: ForkDisposition) -> &'static str {
    match fork {
        ForkDisposition::Created => "created",
        ForkDisposition::AlreadyPresent => "existing",
        ForkDisposition::Failed => "failed",
    }
}

fn idle_days(last_activity: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(last_activity).num_days().max(0)
}
