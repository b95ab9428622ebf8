//! # archiver-lifecycle
//!
//! Inactivity classification and the archive transaction.
//!
//! Call [`pipeline::run`] to list, classify and archive a target's
//! repositories, or use [`InactivityClassifier`] and [`ArchiveExecutor`]
//! directly. Every remote call goes through the shared
//! [`archiver_core::ContinuationPolicy`].

pub mod classifier;
pub mod error;
pub mod pacer;
pub mod pipeline;
pub mod transaction;

pub use classifier::InactivityClassifier;
pub use error::LifecycleError;
pub use pacer::{Pacer, PauseReason, ThreadPacer};
pub use pipeline::{RunReport, RunRequest};
pub use transaction::{
    ArchiveExecutor, ArchiveOutcome, ArchiveState, ArchiveStep, ForkDisposition,
    SuppressedFailure,
};
