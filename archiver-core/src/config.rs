//! Archiver configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.repo-archiver/
//!   config.yaml   (optional — every field has a default)
//! ```
//!
//! # API pattern
//!
//! - `load_at(home: &Path)` — explicit home; used in tests with `TempDir`
//! - `load()` — derives home from `dirs::home_dir()`, delegates to `load_at`
//!
//! CLI flags override file values after loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::continuation::ContinuationPolicy;
use crate::error::ConfigError;
use crate::types::Namespace;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const DAYS_PER_YEAR: i64 = 365;

/// Largest accepted `threshold_years`.
pub const MAX_THRESHOLD_YEARS: u32 = 1000;

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiverConfig {
    /// Repositories idle for at least this many years are inactive.
    pub threshold_years: u32,
    /// Continue past remote-call failures instead of aborting. Hazardous: see
    /// [`crate::continuation`].
    pub force: bool,
    /// Appended to the target to name the archive namespace.
    pub archive_suffix: String,
    /// Pause between repositories while classifying.
    pub throttle_ms: u64,
    /// Pause between fork and delete while archiving.
    pub propagation_wait_secs: u64,
    pub api_url: String,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            threshold_years: 2,
            force: false,
            archive_suffix: "-archive".to_string(),
            throttle_ms: 100,
            propagation_wait_secs: 5,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ArchiverConfig {
    /// Inactivity threshold, counting a year as 365 days.
    pub fn threshold(&self) -> chrono::Duration {
        chrono::Duration::days(DAYS_PER_YEAR * i64::from(self.threshold_years))
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn propagation_wait(&self) -> Duration {
        Duration::from_secs(self.propagation_wait_secs)
    }

    pub fn policy(&self) -> ContinuationPolicy {
        ContinuationPolicy::new(self.force)
    }

    /// `alice` → `alice-archive` with the default suffix.
    pub fn archive_namespace_for(&self, target: &Namespace) -> Namespace {
        target.with_suffix(&self.archive_suffix)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold_years == 0 {
            return Err(ConfigError::Invalid {
                field: "threshold_years",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.threshold_years > MAX_THRESHOLD_YEARS {
            return Err(ConfigError::Invalid {
                field: "threshold_years",
                reason: format!("must be at most {MAX_THRESHOLD_YEARS}"),
            });
        }
        if self.archive_suffix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "archive_suffix",
                reason: "must not be empty; the archive namespace would equal the target"
                    .to_string(),
            });
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// `<home>/.repo-archiver/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".repo-archiver").join("config.yaml")
}

/// Load and validate config from `<home>/.repo-archiver/config.yaml`.
///
/// A missing file yields defaults. Malformed YAML yields
/// [`ConfigError::Parse`] carrying the file path.
pub fn load_at(home: &Path) -> Result<ArchiverConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Ok(ArchiverConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    let config: ArchiverConfig = if contents.trim().is_empty() {
        ArchiverConfig::default()
    } else {
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })?
    };
    config.validate()?;
    Ok(config)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<ArchiverConfig, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    load_at(&home)
}
