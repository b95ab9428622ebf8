//! Error types for archiver-lifecycle.

use thiserror::Error;

use archiver_core::{HostError, Namespace, TargetKind};

use crate::transaction::{ArchiveState, ArchiveStep};

/// All errors that can abort classification, a transaction, or a run.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to list repositories for {kind} {target}: {source}")]
    Listing {
        target: Namespace,
        kind: TargetKind,
        #[source]
        source: HostError,
    },

    #[error("inactivity threshold of {threshold_days} days reaches before the earliest representable date")]
    ThresholdOutOfRange { threshold_days: i64 },

    #[error("failed to check activity for {repo}: {source}")]
    Activity {
        repo: String,
        #[source]
        source: HostError,
    },

    /// The archive namespace is neither an organization nor a user. Never
    /// overridden by force mode.
    #[error(
        "archive namespace '{namespace}' does not exist and cannot be created automatically; \
         create the organization or user account manually"
    )]
    NamespaceMissing { namespace: Namespace },

    /// A transaction step failed in normal mode. States before `reached` are
    /// not rolled back.
    #[error("archiving {repo} failed at step '{step}' (reached {reached}): {source}")]
    Step {
        step: ArchiveStep,
        reached: ArchiveState,
        repo: String,
        #[source]
        source: HostError,
    },
}

impl LifecycleError {
    pub fn is_namespace_missing(&self) -> bool {
        matches!(self, LifecycleError::NamespaceMissing { .. })
    }
}
