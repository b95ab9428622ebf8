//! repo-archiver core library — domain types, host abstraction, errors,
//! continuation policy and configuration.
//!
//! - [`types`] — newtypes and the [`Repository`] snapshot
//! - [`error`] — [`HostError`], [`ConfigError`]
//! - [`continuation`] — the shared abort/continue decision for remote calls
//! - [`hosting`] — the [`HostingService`] trait implemented by host clients
//! - [`config`] — `~/.repo-archiver/config.yaml` loading

pub mod config;
pub mod continuation;
pub mod error;
pub mod hosting;
pub mod types;

pub use config::ArchiverConfig;
pub use continuation::{resolve, ContinuationPolicy};
pub use error::{ConfigError, HostError};
pub use hosting::HostingService;
pub use types::{Namespace, RepoName, Repository, TargetKind};
