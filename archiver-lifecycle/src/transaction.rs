//! The archive transaction.
//!
//! ```text
//! Init ─verify namespace─▶ NamespaceVerified ─fork─▶ Forked ─wait, delete─▶ Deleted ─set archived─▶ Archived
//! ```
//!
//! Transitions are one-way and there is no rollback: a completed fork stays
//! on the host even when a later step fails. Each remote step is gated by the
//! [`ContinuationPolicy`] except namespace verification, which is always
//! fatal.
//!
//! Under force mode a failed step is logged and recorded in
//! [`ArchiveOutcome::suppressed`], and the transaction moves on. That includes
//! deleting the original after a failed fork. The state only advances through
//! steps that succeeded, so a forced run stops short of `Archived` once any
//! step in the chain fails.

use std::fmt;
use std::time::Duration;

use archiver_core::{ContinuationPolicy, HostError, HostingService, Namespace, RepoName};

use crate::error::LifecycleError;
use crate::pacer::{Pacer, PauseReason};

// ---------------------------------------------------------------------------
// States and steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArchiveState {
    Init,
    NamespaceVerified,
    Forked,
    Deleted,
    /// Terminal.
    Archived,
}

impl ArchiveState {
    /// The next state. `Archived` stays `Archived`.
    pub fn advance(self) -> Self {
        match self {
            ArchiveState::Init => ArchiveState::NamespaceVerified,
            ArchiveState::NamespaceVerified => ArchiveState::Forked,
            ArchiveState::Forked => ArchiveState::Deleted,
            ArchiveState::Deleted | ArchiveState::Archived => ArchiveState::Archived,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ArchiveState::Archived
    }

    /// Advance only if the step succeeded and the chain is still unbroken at
    /// `from`. A success after an earlier failure leaves the state alone.
    fn advance_after(self, from: ArchiveState, succeeded: bool) -> Self {
        if succeeded && self == from {
            self.advance()
        } else {
            self
        }
    }
}

impl fmt::Display for ArchiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveState::Init => write!(f, "init"),
            ArchiveState::NamespaceVerified => write!(f, "namespace verified"),
            ArchiveState::Forked => write!(f, "forked"),
            ArchiveState::Deleted => write!(f, "deleted"),
            ArchiveState::Archived => write!(f, "archived"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveStep {
    VerifyNamespace,
    Fork,
    DeleteOriginal,
    SetArchived,
}

impl fmt::Display for ArchiveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveStep::VerifyNamespace => write!(f, "verify namespace"),
            ArchiveStep::Fork => write!(f, "fork"),
            ArchiveStep::DeleteOriginal => write!(f, "delete original"),
            ArchiveStep::SetArchived => write!(f, "set archived"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkDisposition {
    /// A fork was requested.
    Created,
    /// `<namespace>/<name>` already existed; no fork was requested.
    AlreadyPresent,
    /// The fork request failed and force mode continued past it.
    Failed,
}

/// A step error swallowed by force mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressedFailure {
    pub step: ArchiveStep,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    /// `owner/name` of the original.
    pub repo: String,
    /// `namespace/name` of the fork.
    pub archived_as: String,
    /// Furthest state reached through successful steps.
    pub state: ArchiveState,
    pub fork: ForkDisposition,
    pub suppressed: Vec<SuppressedFailure>,
}

impl ArchiveOutcome {
    /// `true` when every step succeeded without force-mode help.
    pub fn is_clean(&self) -> bool {
        self.suppressed.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Drives one repository through the archive transaction.
pub struct ArchiveExecutor<'a, H: HostingService + ?Sized> {
    host: &'a H,
    policy: ContinuationPolicy,
    pacer: &'a dyn Pacer,
    propagation_wait: Duration,
}

impl<'a, H: HostingService + ?Sized> ArchiveExecutor<'a, H> {
    pub fn new(
        host: &'a H,
        policy: ContinuationPolicy,
        pacer: &'a dyn Pacer,
        propagation_wait: Duration,
    ) -> Self {
        Self {
            host,
            policy,
            pacer,
            propagation_wait,
        }
    }

    /// Move `owner/name` into `archive_namespace` and mark the fork archived.
    pub fn archive(
        &self,
        owner: &Namespace,
        archive_namespace: &Namespace,
        name: &RepoName,
    ) -> Result<ArchiveOutcome, LifecycleError> {
        let repo = format!("{owner}/{name}");
        let archived_as = format!("{archive_namespace}/{name}");
        let mut state = ArchiveState::Init;
        let mut suppressed = Vec::new();
        tracing::debug!(%repo, "beginning archive transaction");

        tracing::info!("verifying archive namespace {archive_namespace}");
        self.verify_namespace(archive_namespace)?;
        state = state.advance();

        tracing::info!("forking {repo} to {archive_namespace}");
        let fork = self.fork(owner, archive_namespace, name, state, &mut suppressed)?;
        state = state.advance_after(
            ArchiveState::NamespaceVerified,
            fork != ForkDisposition::Failed,
        );

        self.pacer
            .pause(PauseReason::ForkPropagation, self.propagation_wait);

        tracing::info!("deleting original repository {repo}");
        let deleted = self.gate(
            ArchiveStep::DeleteOriginal,
            state,
            &repo,
            self.host.delete_repository(owner, name),
            &mut suppressed,
        )?;
        state = state.advance_after(ArchiveState::Forked, deleted);

        tracing::info!("setting archived status on {archived_as}");
        let marked = self.gate(
            ArchiveStep::SetArchived,
            state,
            &repo,
            self.host.set_archived(archive_namespace, name, true),
            &mut suppressed,
        )?;
        state = state.advance_after(ArchiveState::Deleted, marked);

        if state.is_terminal() {
            tracing::info!("{repo} archived as {archived_as}");
        } else {
            tracing::warn!(%repo, %state, "archive transaction incomplete");
        }
        Ok(ArchiveOutcome {
            repo,
            archived_as,
            state,
            fork,
            suppressed,
        })
    }

    fn verify_namespace(&self, namespace: &Namespace) -> Result<(), LifecycleError> {
        match self.host.namespace_exists(namespace) {
            Ok(true) => {
                tracing::debug!("archive namespace {namespace} confirmed");
                Ok(())
            }
            Ok(false) => {
                tracing::error!(%namespace, "archive namespace does not exist");
                Err(LifecycleError::NamespaceMissing {
                    namespace: namespace.clone(),
                })
            }
            Err(err) => {
                tracing::error!(%namespace, error = %err, "archive namespace lookup failed");
                Err(LifecycleError::NamespaceMissing {
                    namespace: namespace.clone(),
                })
            }
        }
    }

    fn fork(
        &self,
        owner: &Namespace,
        archive_namespace: &Namespace,
        name: &RepoName,
        reached: ArchiveState,
        suppressed: &mut Vec<SuppressedFailure>,
    ) -> Result<ForkDisposition, LifecycleError> {
        match self.host.repository_exists(archive_namespace, name) {
            Ok(true) => {
                tracing::info!("{archive_namespace}/{name} already exists, skipping fork creation");
                return Ok(ForkDisposition::AlreadyPresent);
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(
                    repo = %format!("{archive_namespace}/{name}"),
                    error = %err,
                    "existence check failed; requesting fork"
                );
            }
        }

        let created = self.gate(
            ArchiveStep::Fork,
            reached,
            &format!("{owner}/{name}"),
            self.host.fork_repository(owner, name, archive_namespace),
            suppressed,
        )?;
        if created {
            tracing::debug!("forked {owner}/{name} to {archive_namespace}");
            Ok(ForkDisposition::Created)
        } else {
            Ok(ForkDisposition::Failed)
        }
    }

    /// Apply the continuation policy to one step result. `Ok(false)` means
    /// the step failed and force mode continued.
    fn gate(
        &self,
        step: ArchiveStep,
        reached: ArchiveState,
        repo: &str,
        result: Result<(), HostError>,
        suppressed: &mut Vec<SuppressedFailure>,
    ) -> Result<bool, LifecycleError> {
        let Err(err) = result else {
            return Ok(true);
        };
        tracing::error!(%repo, %step, error = %err, "archive step failed");
        if self.policy.proceeds(Some(&err)) {
            tracing::warn!(%repo, %step, "force mode: continuing past failed step");
            suppressed.push(SuppressedFailure {
                step,
                message: err.to_string(),
            });
            return Ok(false);
        }
        Err(LifecycleError::Step {
            step,
            reached,
            repo: repo.to_string(),
            source: err,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_advance_in_order() {
        let mut state = ArchiveState::Init;
        let mut seen = vec![state];
        while !state.is_terminal() {
            state = state.advance();
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                ArchiveState::Init,
                ArchiveState::NamespaceVerified,
                ArchiveState::Forked,
                ArchiveState::Deleted,
                ArchiveState::Archived,
            ]
        );
    }

    #[test]
    fn archived_is_absorbing() {
        assert_eq!(ArchiveState::Archived.advance(), ArchiveState::Archived);
    }

    #[test]
    fn failed_step_holds_state() {
        assert_eq!(
            ArchiveState::Forked.advance_after(ArchiveState::Forked, false),
            ArchiveState::Forked
        );
    }

    #[test]
    fn success_after_a_broken_chain_does_not_advance() {
        assert_eq!(
            ArchiveState::Forked.advance_after(ArchiveState::Deleted, true),
            ArchiveState::Forked
        );
        assert_eq!(
            ArchiveState::Deleted.advance_after(ArchiveState::Deleted, true),
            ArchiveState::Archived
        );
    }

    #[test]
    fn transitions_only_move_forward() {
        for state in [
            ArchiveState::Init,
            ArchiveState::NamespaceVerified,
            ArchiveState::Forked,
            ArchiveState::Deleted,
        ] {
            assert!(state.advance() > state);
        }
    }
}
