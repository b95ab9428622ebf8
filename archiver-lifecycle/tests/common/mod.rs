//! Scripted in-memory host shared by the lifecycle integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use archiver_core::{HostError, HostingService, Namespace, RepoName, Repository, TargetKind};
use archiver_lifecycle::{Pacer, PauseReason};
use chrono::{DateTime, TimeZone, Utc};

pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn now() -> DateTime<Utc> {
    ts(2025, 6, 1)
}

pub fn repo(owner: &str, name: &str, archived: bool) -> Repository {
    Repository {
        owner: Namespace::from(owner),
        name: RepoName::from(name),
        last_activity: now(),
        is_archived: archived,
    }
}

/// Records every call in `log` and answers from its scripted tables.
#[derive(Default)]
pub struct ScriptedHost {
    pub log: CallLog,
    pub listing: Vec<Repository>,
    pub listing_error: Option<HostError>,
    pub pushed: HashMap<String, DateTime<Utc>>,
    pub issues: HashMap<String, DateTime<Utc>>,
    pub push_errors: HashSet<String>,
    pub issue_errors: HashSet<String>,
    pub namespaces: HashSet<String>,
    pub existing: HashSet<String>,
    pub fail: HashMap<&'static str, HostError>,
}

impl ScriptedHost {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn with_push(mut self, full_name: &str, at: DateTime<Utc>) -> Self {
        self.pushed.insert(full_name.to_string(), at);
        self
    }

    pub fn with_issue(mut self, full_name: &str, at: DateTime<Utc>) -> Self {
        self.issues.insert(full_name.to_string(), at);
        self
    }

    pub fn with_namespace(mut self, name: &str) -> Self {
        self.namespaces.insert(name.to_string());
        self
    }

    pub fn with_existing(mut self, full_name: &str) -> Self {
        self.existing.insert(full_name.to_string());
        self
    }

    /// Fail the named operation (`fork`, `delete`, `set_archived`, ...).
    pub fn failing(mut self, op: &'static str, err: HostError) -> Self {
        self.fail.insert(op, err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn record(&self, call: String) {
        self.log.borrow_mut().push(call);
    }

    fn scripted(&self, op: &'static str) -> Result<(), HostError> {
        match self.fail.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl HostingService for ScriptedHost {
    fn list_repositories(
        &self,
        target: &Namespace,
        kind: TargetKind,
    ) -> Result<Vec<Repository>, HostError> {
        self.record(format!("list {kind} {target}"));
        match &self.listing_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.listing.clone()),
        }
    }

    fn pushed_at(&self, owner: &Namespace, name: &RepoName) -> Result<DateTime<Utc>, HostError> {
        let key = format!("{owner}/{name}");
        self.record(format!("pushed_at {key}"));
        if self.push_errors.contains(&key) {
            return Err(HostError::Status {
                status: 500,
                message: "server error".into(),
            });
        }
        self.pushed
            .get(&key)
            .copied()
            .ok_or_else(|| HostError::not_found(key))
    }

    fn latest_issue_activity(
        &self,
        owner: &Namespace,
        name: &RepoName,
    ) -> Result<Option<DateTime<Utc>>, HostError> {
        let key = format!("{owner}/{name}");
        self.record(format!("issues {key}"));
        if self.issue_errors.contains(&key) {
            return Err(HostError::Transport("connection reset".into()));
        }
        Ok(self.issues.get(&key).copied())
    }

    fn namespace_exists(&self, name: &Namespace) -> Result<bool, HostError> {
        self.record(format!("namespace_exists {name}"));
        self.scripted("namespace_exists")?;
        Ok(self.namespaces.contains(&name.0))
    }

    fn repository_exists(&self, owner: &Namespace, name: &RepoName) -> Result<bool, HostError> {
        let key = format!("{owner}/{name}");
        self.record(format!("repository_exists {key}"));
        self.scripted("repository_exists")?;
        Ok(self.existing.contains(&key))
    }

    fn fork_repository(
        &self,
        owner: &Namespace,
        name: &RepoName,
        target: &Namespace,
    ) -> Result<(), HostError> {
        self.record(format!("fork {owner}/{name} -> {target}"));
        self.scripted("fork")
    }

    fn delete_repository(&self, owner: &Namespace, name: &RepoName) -> Result<(), HostError> {
        self.record(format!("delete {owner}/{name}"));
        self.scripted("delete")
    }

    fn set_archived(
        &self,
        owner: &Namespace,
        name: &RepoName,
        archived: bool,
    ) -> Result<(), HostError> {
        self.record(format!("set_archived {owner}/{name} {archived}"));
        self.scripted("set_archived")
    }
}

/// Writes each pause into the shared call log instead of sleeping.
pub struct RecordingPacer {
    pub log: CallLog,
}

impl Pacer for RecordingPacer {
    fn pause(&self, reason: PauseReason, _duration: Duration) {
        self.log.borrow_mut().push(format!("wait {reason}"));
    }
}

pub fn host_and_pacer() -> (ScriptedHost, RecordingPacer) {
    let log = CallLog::default();
    (
        ScriptedHost::new(Rc::clone(&log)),
        RecordingPacer { log },
    )
}
