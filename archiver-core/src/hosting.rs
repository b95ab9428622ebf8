//! The hosting-service seam.
//!
//! Classification and archiving talk to the host only through
//! [`HostingService`]. `archiver-github` provides the real implementation;
//! tests use scripted in-memory fakes.

use chrono::{DateTime, Utc};

use crate::error::HostError;
use crate::types::{Namespace, RepoName, Repository, TargetKind};

/// Blocking operations against a repository host.
pub trait HostingService {
    /// All repositories owned by `target`, across every page.
    fn list_repositories(
        &self,
        target: &Namespace,
        kind: TargetKind,
    ) -> Result<Vec<Repository>, HostError>;

    /// Last push to the repository (primary repository fetch).
    fn pushed_at(&self, owner: &Namespace, name: &RepoName) -> Result<DateTime<Utc>, HostError>;

    /// Update time of the most recently updated issue or pull request, if any.
    fn latest_issue_activity(
        &self,
        owner: &Namespace,
        name: &RepoName,
    ) -> Result<Option<DateTime<Utc>>, HostError>;

    /// Authoritative last activity: the later of the last push and the most
    /// recent issue/PR update.
    ///
    /// Only a failed push lookup is returned as an error. A failed issue/PR
    /// lookup is logged and the push timestamp is used alone.
    fn last_activity(
        &self,
        owner: &Namespace,
        name: &RepoName,
    ) -> Result<DateTime<Utc>, HostError> {
        let pushed = self.pushed_at(owner, name)?;
        tracing::debug!(%owner, %name, pushed = %pushed.format("%Y-%m-%d"), "last push");

        match self.latest_issue_activity(owner, name) {
            Ok(Some(issue)) if issue > pushed => {
                tracing::debug!(
                    %owner,
                    %name,
                    issue = %issue.format("%Y-%m-%d"),
                    "issue/PR activity is more recent than last push"
                );
                Ok(issue)
            }
            Ok(_) => Ok(pushed),
            Err(err) => {
                tracing::warn!(%owner, %name, error = %err, "issue/PR lookup failed; using last push");
                Ok(pushed)
            }
        }
    }

    /// `true` when `name` resolves to an organization or a user account.
    fn namespace_exists(&self, name: &Namespace) -> Result<bool, HostError>;

    fn repository_exists(&self, owner: &Namespace, name: &RepoName) -> Result<bool, HostError>;

    /// Request a fork of `owner/name` into `target`.
    fn fork_repository(
        &self,
        owner: &Namespace,
        name: &RepoName,
        target: &Namespace,
    ) -> Result<(), HostError>;

    fn delete_repository(&self, owner: &Namespace, name: &RepoName) -> Result<(), HostError>;

    /// Fetch `owner/name`, failing with [`HostError::NotFound`] when absent,
    /// then push the new archived flag.
    fn set_archived(
        &self,
        owner: &Namespace,
        name: &RepoName,
        archived: bool,
    ) -> Result<(), HostError>;
}
