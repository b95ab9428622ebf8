//! Wire shapes for the GitHub REST responses the client reads.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use archiver_core::{Namespace, RepoName, Repository};

#[derive(Debug, Deserialize)]
pub(crate) struct ApiOwner {
    pub login: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiRepository {
    pub name: Option<String>,
    pub owner: Option<ApiOwner>,
    #[serde(default)]
    pub archived: bool,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiRepository {
    /// `None` when the name or owner login is missing.
    pub fn into_repository(self) -> Option<Repository> {
        let name = self.name?;
        let login = self.owner?.login?;
        Some(Repository {
            owner: Namespace(login),
            name: RepoName(name),
            last_activity: self.updated_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            is_archived: self.archived,
        })
    }

    /// Last push. Empty repositories have none; fall back to creation time.
    pub fn last_push(&self) -> DateTime<Utc> {
        self.pushed_at
            .or(self.created_at)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiIssue {
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
