use chrono::{DateTime, Utc};
use serde_json::json;

use archiver_core::{HostError, HostingService, Namespace, RepoName, Repository, TargetKind};

use crate::client::GitHubClient;
use crate::models::{ApiIssue, ApiRepository};

impl HostingService for GitHubClient {
    fn list_repositories(
        &self,
        target: &Namespace,
        kind: TargetKind,
    ) -> Result<Vec<Repository>, HostError> {
        let path = match kind {
            TargetKind::User => format!("/users/{target}/repos"),
            TargetKind::Organization => format!("/orgs/{target}/repos"),
        };
        let raw = self.list_all(&path, &format!("repositories of {kind} {target}"))?;

        let mut repos = Vec::with_capacity(raw.len());
        for entry in raw {
            match entry.into_repository() {
                Some(repo) => repos.push(repo),
                None => tracing::warn!("skipping repository with incomplete data"),
            }
        }
        tracing::info!("retrieved {} valid repositories for {target}", repos.len());
        Ok(repos)
    }

    fn pushed_at(&self, owner: &Namespace, name: &RepoName) -> Result<DateTime<Utc>, HostError> {
        let repo: ApiRepository =
            self.get_json(&format!("/repos/{owner}/{name}"), &format!("{owner}/{name}"))?;
        Ok(repo.last_push())
    }

    fn latest_issue_activity(
        &self,
        owner: &Namespace,
        name: &RepoName,
    ) -> Result<Option<DateTime<Utc>>, HostError> {
        let issues: Vec<ApiIssue> = self.get_json(
            &format!("/repos/{owner}/{name}/issues?state=all&sort=updated&direction=desc&per_page=1"),
            &format!("issues of {owner}/{name}"),
        )?;
        Ok(issues.first().map(|issue| issue.updated_at))
    }

    /// Organization first, then user. An organization lookup error does not
    /// skip the user lookup; it is returned only if the user lookup cannot
    /// confirm the namespace either.
    fn namespace_exists(&self, name: &Namespace) -> Result<bool, HostError> {
        let org = self.exists(&format!("/orgs/{name}"), &format!("organization {name}"));
        let org_error = match org {
            Ok(true) => {
                tracing::debug!("{name} exists as an organization");
                return Ok(true);
            }
            Ok(false) => None,
            Err(err) => {
                tracing::warn!(
                    namespace = %name,
                    error = %err,
                    "organization lookup failed; trying user"
                );
                Some(err)
            }
        };
        if self.exists(&format!("/users/{name}"), &format!("user {name}"))? {
            tracing::debug!("{name} exists as a user");
            return Ok(true);
        }
        match org_error {
            Some(err) => Err(err),
            None => Ok(false),
        }
    }

    fn repository_exists(&self, owner: &Namespace, name: &RepoName) -> Result<bool, HostError> {
        self.exists(&format!("/repos/{owner}/{name}"), &format!("{owner}/{name}"))
    }

    fn fork_repository(
        &self,
        owner: &Namespace,
        name: &RepoName,
        target: &Namespace,
    ) -> Result<(), HostError> {
        self.send(
            "POST",
            &format!("/repos/{owner}/{name}/forks"),
            &format!("{owner}/{name}"),
            Some(json!({ "organization": target.0 })),
        )
    }

    fn delete_repository(&self, owner: &Namespace, name: &RepoName) -> Result<(), HostError> {
        self.send(
            "DELETE",
            &format!("/repos/{owner}/{name}"),
            &format!("{owner}/{name}"),
            None,
        )
    }

    fn set_archived(
        &self,
        owner: &Namespace,
        name: &RepoName,
        archived: bool,
    ) -> Result<(), HostError> {
        let path = format!("/repos/{owner}/{name}");
        let resource = format!("{owner}/{name}");
        if !self.exists(&path, &resource)? {
            return Err(HostError::not_found(resource));
        }
        self.send("PATCH", &path, &resource, Some(json!({ "archived": archived })))
    }
}
