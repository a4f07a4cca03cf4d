//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{MeshfsError, Result};

/// Full meshfs configuration model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub discovery: DiscoveryConfig,
}

/// Scanner behavior and filter defaults (C1-C4).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScannerConfig {
    /// Directory names or absolute paths that are always skipped.
    pub ignore_dirs: BTreeSet<String>,
    pub scan_hidden_dirs: bool,
    pub scan_hidden_files: bool,
    /// Upper bound on concurrently running scan workers.
    pub max_workers: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: BTreeSet::new(),
            scan_hidden_dirs: false,
            scan_hidden_files: true,
            max_workers: 32,
        }
    }
}

/// LAN discovery and fan-out defaults (C5-C8).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// TCP port the health/search endpoints are served on for every peer.
    pub port: u16,
    /// Path of the health-check endpoint.
    pub health_path: String,
    /// Hard per-probe deadline, in milliseconds.
    pub probe_deadline_ms: u64,
    /// Maximum number of concurrent health probes during discovery.
    pub max_probe_concurrency: usize,
    /// Client-side timeout applied to each fan-out request, in seconds.
    pub fanout_timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            port: 10000,
            health_path: "/fs/health/".to_string(),
            probe_deadline_ms: 300,
            max_probe_concurrency: 256,
            fanout_timeout_secs: 30,
        }
    }
}

impl DiscoveryConfig {
    #[must_use]
    pub fn probe_deadline(&self) -> Duration {
        Duration::from_millis(self.probe_deadline_ms)
    }

    #[must_use]
    pub fn fanout_timeout(&self) -> Duration {
        Duration::from_secs(self.fanout_timeout_secs)
    }

    #[must_use]
    pub fn health_url(&self, host: &str) -> String {
        format!("http://{host}:{}{}", self.port, self.health_path)
    }

    #[must_use]
    pub fn search_url(&self, host: &str) -> String {
        format!("http://{host}:{}/fs/search-directory/", self.port)
    }
}

impl Config {
    /// Default configuration file path: `~/.config/meshfs/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        Ok(crate::core::paths::home_dir()?
            .join(".config")
            .join("meshfs")
            .join("config.toml"))
    }

    /// Load config from an explicit path, the `MESHFS_CONFIG` env var, or the
    /// default path, then apply env var overrides.
    ///
    /// A missing config file at the default/env-derived path is not an
    /// error — defaults are used. An explicit path that does not exist is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = if path.is_none() {
            env::var_os("MESHFS_CONFIG").map(PathBuf::from)
        } else {
            None
        };
        let is_explicit = path.is_some() || env_path.is_some();
        let resolved = match path.map(Path::to_path_buf).or(env_path) {
            Some(p) => p,
            None => Self::default_path()?,
        };

        let mut config = if resolved.exists() {
            let raw = fs::read_to_string(&resolved).map_err(|e| MeshfsError::io(&resolved, e))?;
            toml::from_str(&raw)?
        } else if is_explicit {
            return Err(MeshfsError::MissingConfig { path: resolved });
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(raw) = env_var("MESHFS_MAX_WORKERS") {
            self.scanner.max_workers = parse_env("MESHFS_MAX_WORKERS", &raw)?;
        }
        if let Some(raw) = env_var("MESHFS_DISCOVERY_PORT") {
            self.discovery.port = parse_env("MESHFS_DISCOVERY_PORT", &raw)?;
        }
        if let Some(raw) = env_var("MESHFS_PROBE_DEADLINE_MS") {
            self.discovery.probe_deadline_ms = parse_env("MESHFS_PROBE_DEADLINE_MS", &raw)?;
        }
        if let Some(raw) = env_var("MESHFS_MAX_PROBE_CONCURRENCY") {
            self.discovery.max_probe_concurrency =
                parse_env("MESHFS_MAX_PROBE_CONCURRENCY", &raw)?;
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|error: T::Err| MeshfsError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}
