//! GitHub REST implementation of [`archiver_core::HostingService`].
//!
//! Blocking, one request at a time, authenticated with a personal access
//! token.

mod client;
mod models;
mod pagination;
mod service;

pub use client::GitHubClient;
pub use pagination::next_link;
