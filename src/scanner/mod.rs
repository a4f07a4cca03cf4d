//! Concurrent directory scanner: filters, single-directory enumeration,
//! worker-pool traversal, and the public scan entry points.

pub mod bucket;
pub mod engine;
pub mod facade;
pub mod filter;
pub mod walker;

pub use bucket::{Bucket, Summary};
pub use facade::{SearchScanConfig, deep_scan, search_scan, shallow_scan};
