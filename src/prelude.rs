//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use meshfs::prelude::*;
//! ```

// Core
pub use crate::core::config::{Config, DiscoveryConfig, ScannerConfig};
pub use crate::core::errors::{MeshfsError, Result};

// Scanner
pub use crate::scanner::{Bucket, SearchScanConfig, Summary, deep_scan, search_scan, shallow_scan};

// Net
pub use crate::net::{FanoutRequest, PeerSearchResult, PeerSet, discover, fan_out};
