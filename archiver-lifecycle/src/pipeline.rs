//! Shared run entrypoint used by `repo-archiver scan` and `repo-archiver archive`.
//!
//! 1. List the target's repositories.
//! 2. Classify them.
//! 3. Unless dry-running, archive each inactive repository in turn.

use chrono::{DateTime, Utc};

use archiver_core::{ArchiverConfig, HostingService, Namespace, Repository, TargetKind};

use crate::classifier::InactivityClassifier;
use crate::error::LifecycleError;
use crate::pacer::Pacer;
use crate::transaction::{ArchiveExecutor, ArchiveOutcome};

/// What to run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub target: Namespace,
    pub kind: TargetKind,
    /// Classify only; make no changes.
    pub dry_run: bool,
    /// Overrides the `<target><suffix>` archive namespace.
    pub archive_namespace: Option<Namespace>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub target: Namespace,
    pub archive_namespace: Namespace,
    pub listed: usize,
    pub inactive: Vec<Repository>,
    pub archived: Vec<ArchiveOutcome>,
    pub dry_run: bool,
}

/// Run the pipeline for one target.
///
/// In normal mode the first failure aborts the run. In force mode a listing
/// failure yields an empty listing and step failures are recorded on each
/// [`ArchiveOutcome`]. A missing archive namespace always aborts.
pub fn run<H: HostingService + ?Sized>(
    host: &H,
    config: &ArchiverConfig,
    request: &RunRequest,
    now: DateTime<Utc>,
    pacer: &dyn Pacer,
) -> Result<RunReport, LifecycleError> {
    let policy = config.policy();
    let archive_namespace = request
        .archive_namespace
        .clone()
        .unwrap_or_else(|| config.archive_namespace_for(&request.target));

    tracing::info!("fetching repositories for {} {}", request.kind, request.target);
    let listing = host.list_repositories(&request.target, request.kind);
    if let Err(err) = &listing {
        tracing::error!(namespace = %request.target, error = %err, "failed to list repositories");
    }
    let repos = policy
        .absorb(listing)
        .map_err(|source| LifecycleError::Listing {
            target: request.target.clone(),
            kind: request.kind,
            source,
        })?
        .unwrap_or_default();
    tracing::info!("found {} repositories for {}", repos.len(), request.target);

    let classifier = InactivityClassifier::new(host, config.threshold(), policy, pacer)
        .with_throttle(config.throttle());
    let inactive = classifier.find_inactive(&repos, now)?;

    let mut report = RunReport {
        target: request.target.clone(),
        archive_namespace: archive_namespace.clone(),
        listed: repos.len(),
        inactive,
        archived: Vec::new(),
        dry_run: request.dry_run,
    };

    if report.inactive.is_empty() {
        tracing::info!("no inactive repositories found");
        return Ok(report);
    }
    if request.dry_run {
        tracing::info!("dry run: no changes made");
        return Ok(report);
    }

    let executor = ArchiveExecutor::new(host, policy, pacer, config.propagation_wait());
    let total = report.inactive.len();
    for (i, repo) in report.inactive.iter().enumerate() {
        tracing::info!("[{}/{total}] processing {}", i + 1, repo.full_name());
        // Force mode absorbs step errors inside the transaction; anything
        // returned here is fatal.
        let outcome = match executor.archive(&repo.owner, &archive_namespace, &repo.name) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(repo = %repo.full_name(), error = %err, "failed to archive repository");
                return Err(err);
            }
        };
        if outcome.is_clean() {
            tracing::info!("[{}/{total}] archived {}", i + 1, repo.full_name());
        } else {
            tracing::warn!(
                "[{}/{total}] {} finished with {} suppressed failure(s)",
                i + 1,
                repo.full_name(),
                outcome.suppressed.len()
            );
        }
        report.archived.push(outcome);
    }

    tracing::info!(
        "archive run completed: {} repositories archived",
        report.archived.len()
    );
    Ok(report)
}
