//! Inactivity classification.
//!
//! A repository is inactive when its authoritative last activity (later of
//! last push and most recent issue/PR update) is strictly before
//! `now - threshold`. Already-archived repositories are never reconsidered.

use std::time::Duration;

use chrono::{DateTime, Utc};

use archiver_core::{ContinuationPolicy, HostingService, Repository};

use crate::error::LifecycleError;
use crate::pacer::{Pacer, PauseReason};

/// Finds inactive repositories in a listing.
pub struct InactivityClassifier<'a, H: HostingService + ?Sized> {
    host: &'a H,
    threshold: chrono::Duration,
    policy: ContinuationPolicy,
    pacer: &'a dyn Pacer,
    throttle: Duration,
}

impl<'a, H: HostingService + ?Sized> InactivityClassifier<'a, H> {
    pub fn new(
        host: &'a H,
        threshold: chrono::Duration,
        policy: ContinuationPolicy,
        pacer: &'a dyn Pacer,
    ) -> Self {
        Self {
            host,
            threshold,
            policy,
            pacer,
            throttle: Duration::from_millis(100),
        }
    }

    /// Override the fixed pause taken after each non-archived repository.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Non-archived repositories whose last activity predates
    /// `now - threshold`, in input order, each carrying its authoritative
    /// `last_activity`.
    ///
    /// A threshold reaching past the earliest representable date fails with
    /// [`LifecycleError::ThresholdOutOfRange`] before any host call.
    ///
    /// A failed activity lookup aborts the whole call unless the policy is in
    /// force mode. Under force the activity is unknown and the repository is
    /// dated at the Unix epoch, which makes it inactive.
    pub fn find_inactive(
        &self,
        repos: &[Repository],
        now: DateTime<Utc>,
    ) -> Result<Vec<Repository>, LifecycleError> {
        let cutoff = now.checked_sub_signed(self.threshold).ok_or(
            LifecycleError::ThresholdOutOfRange {
                threshold_days: self.threshold.num_days(),
            },
        )?;
        tracing::debug!(
            threshold_days = self.threshold.num_days(),
            cutoff = %cutoff.format("%Y-%m-%d"),
            "inactivity cutoff"
        );
        tracing::info!("analyzing {} repositories for inactivity", repos.len());

        let mut inactive = Vec::new();
        for (i, repo) in repos.iter().enumerate() {
            let full_name = repo.full_name();
            tracing::debug!("[{}/{}] checking {full_name}", i + 1, repos.len());

            if repo.is_archived {
                tracing::debug!("skipping {full_name}: already archived");
                continue;
            }

            let lookup = self.host.last_activity(&repo.owner, &repo.name);
            if let Err(err) = &lookup {
                tracing::error!(repo = %full_name, error = %err, "failed to check activity");
            }
            let last_activity = match self.policy.absorb(lookup) {
                Ok(Some(ts)) => ts,
                Ok(None) => DateTime::<Utc>::UNIX_EPOCH,
                Err(source) => {
                    return Err(LifecycleError::Activity {
                        repo: full_name,
                        source,
                    })
                }
            };

            let mut classified = repo.clone();
            classified.last_activity = last_activity;

            let idle_days = (now - last_activity).num_days();
            if last_activity < cutoff {
                tracing::debug!(
                    "{full_name} is inactive (last activity {}, {idle_days}d ago)",
                    last_activity.format("%Y-%m-%d")
                );
                inactive.push(classified);
            } else {
                tracing::debug!(
                    "{full_name} is active (last activity {}, {idle_days}d ago)",
                    last_activity.format("%Y-%m-%d")
                );
            }

            self.pacer.pause(PauseReason::Throttle, self.throttle);
        }

        tracing::info!(
            "found {} inactive repositories out of {} total",
            inactive.len(),
            repos.len()
        );
        Ok(inactive)
    }
}
