//! MESHFS-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, MeshfsError>;

/// Top-level error type for meshfs.
///
/// Nothing the scan engine or the discovery/fan-out subsystems do during
/// normal operation is fatal — per-directory, per-probe, and per-peer
/// failures are recorded in-band (see the per-directory `Bucket::error` and
/// the per-peer `__error__` pseudo-result). This type exists for the
/// remaining class of failures: malformed configuration and failures that
/// prevent a subsystem from starting at all.
#[derive(Debug, Error)]
pub enum MeshfsError {
    #[error("[MESHFS-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[MESHFS-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[MESHFS-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[MESHFS-2001] could not resolve home directory")]
    NoHomeDirectory,

    #[error("[MESHFS-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[MESHFS-3001] permission denied for {path}")]
    PermissionDenied { path: PathBuf },

    #[error("[MESHFS-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[MESHFS-3003] channel closed in component {component}")]
    ChannelClosed { component: &'static str },

    #[error("[MESHFS-4001] no private IPv4 subnets found on this host")]
    NoSubnets,

    #[error("[MESHFS-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl MeshfsError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "MESHFS-1001",
            Self::MissingConfig { .. } => "MESHFS-1002",
            Self::ConfigParse { .. } => "MESHFS-1003",
            Self::NoHomeDirectory => "MESHFS-2001",
            Self::Serialization { .. } => "MESHFS-2101",
            Self::PermissionDenied { .. } => "MESHFS-3001",
            Self::Io { .. } => "MESHFS-3002",
            Self::ChannelClosed { .. } => "MESHFS-3003",
            Self::NoSubnets => "MESHFS-4001",
            Self::Runtime { .. } => "MESHFS-3900",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::ChannelClosed { .. } | Self::Runtime { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for MeshfsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for MeshfsError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
