//! Domain types for repositories on a hosting service.
//!
//! Values here are read-only snapshots fetched per run; nothing is persisted
//! locally.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A user or organization login on the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace(pub String);

impl Namespace {
    /// `<self><suffix>`, e.g. `alice` + `-archive` → `alice-archive`.
    pub fn with_suffix(&self, suffix: &str) -> Namespace {
        Namespace(format!("{}{suffix}", self.0))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Namespace {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Namespace {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A repository name, stable within a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoName(pub String);

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a listing target is resolved on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    User,
    Organization,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::User => write!(f, "user"),
            TargetKind::Organization => write!(f, "organization"),
        }
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// A hosted repository as seen in one listing.
///
/// `last_activity` straight from a listing is the host's "updated" field.
/// The inactivity classifier replaces it with the authoritative value (later
/// of last push and most recent issue/PR update) before returning it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: Namespace,
    pub name: RepoName,
    pub last_activity: DateTime<Utc>,
    pub is_archived: bool,
}

impl Repository {
    /// `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(Namespace::from("alice").to_string(), "alice");
        assert_eq!(RepoName::from("old-proj").to_string(), "old-proj");
    }

    #[test]
    fn archive_namespace_suffix() {
        let ns = Namespace::from("alice").with_suffix("-archive");
        assert_eq!(ns, Namespace::from("alice-archive"));
    }

    #[test]
    fn full_name_joins_owner_and_name() {
        let repo = Repository {
            owner: Namespace::from("alice"),
            name: RepoName::from("old-proj"),
            last_activity: Utc::now(),
            is_archived: false,
        };
        assert_eq!(repo.full_name(), "alice/old-proj");
    }

    #[test]
    fn target_kind_display() {
        assert_eq!(TargetKind::User.to_string(), "user");
        assert_eq!(TargetKind::Organization.to_string(), "organization");
    }
}
