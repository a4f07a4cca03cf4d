//! Public scan entry points (C4): `shallow_scan`, `deep_scan`, `search_scan`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::config::ScannerConfig;
use crate::core::errors::Result;
use crate::core::paths::normalize_root;
use crate::scanner::bucket::{self, Bucket, ShallowProjection, Summary};
use crate::scanner::engine;
use crate::scanner::walker::{self, SearchFilters};

/// Search-specific filters, layered on top of the scanner's base config.
#[derive(Debug, Clone, Default)]
pub struct SearchScanConfig {
    pub search_file_names: Option<Vec<String>>,
    pub search_file_extensions: Option<Vec<String>>,
}

/// Skim only the immediate contents of `root_path` (no recursion).
///
/// # Errors
/// Returns an error only if `root_path` cannot be resolved to a location on
/// disk (e.g. `~` expansion fails because `HOME` is unset). A root that does
/// not exist on disk is not an error here — it surfaces as a
/// `ShallowProjection` carrying `error`.
pub fn shallow_scan(config: &ScannerConfig, root_path: &str) -> Result<ShallowProjection> {
    let root = normalize_root(root_path)?;
    let bucket = walker::skim_root(config, &root, &SearchFilters::default());
    Ok(bucket.shallow())
}

/// Recursively scan `root_path` with the worker-pool engine, returning the
/// full result tree and its summary.
///
/// # Errors
/// See [`shallow_scan`].
pub fn deep_scan(config: &ScannerConfig, root_path: &str) -> Result<(Bucket, Summary)> {
    let root = normalize_root(root_path)?;
    let tree = engine::scan(config, &root, &SearchFilters::default());
    let summary = bucket::summarize(&tree);
    Ok((tree, summary))
}

/// Recursively scan `root_path` applying `search`'s filters, and flatten the
/// result to `directory -> matched file basenames`.
///
/// Directories that carry an `error` are skipped in the flattened output; a
/// caller that needs to know about scan errors should call [`deep_scan`]
/// directly.
///
/// # Errors
/// See [`shallow_scan`].
pub fn search_scan(
    config: &ScannerConfig,
    root_path: &str,
    search: &SearchScanConfig,
) -> Result<BTreeMap<PathBuf, Vec<String>>> {
    let root = normalize_root(root_path)?;
    let filters = SearchFilters {
        search_file_names: search.search_file_names.as_deref(),
        search_file_extensions: search.search_file_extensions.as_deref(),
    };
    let tree = engine::scan(config, &root, &filters);
    Ok(bucket::flatten_matches(&tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config() -> ScannerConfig {
        ScannerConfig::default()
    }

    #[test]
    fn shallow_scan_lists_immediate_contents_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), b"x").unwrap();
        fs::create_dir_all(tmp.path().join("sub/nested")).unwrap();

        let projection = shallow_scan(&config(), tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(projection.files, vec!["a.txt".to_string()]);
        assert_eq!(projection.dirs, vec!["sub".to_string()]);
        assert!(projection.error.is_none());
    }

    #[test]
    fn deep_scan_returns_tree_and_summary() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("a/b/f.txt"), b"x").unwrap();

        let (tree, summary) = deep_scan(&config(), tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(summary.file_count, 1);
        assert_eq!(summary.dir_count, 2);
        assert_eq!(tree.path, tmp.path());
    }

    #[test]
    fn search_scan_flattens_extension_matches_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("photos")).unwrap();
        fs::write(tmp.path().join("photos/cat.PNG"), b"x").unwrap();
        fs::write(tmp.path().join("photos/notes.txt"), b"x").unwrap();

        let search = SearchScanConfig {
            search_file_names: None,
            search_file_extensions: Some(vec!["png".to_string()]),
        };
        let result = search_scan(&config(), tmp.path().to_str().unwrap(), &search).unwrap();
        let photos_dir = tmp.path().join("photos");
        assert_eq!(result.get(&photos_dir), Some(&vec!["cat.PNG".to_string()]));
    }

    #[test]
    fn search_scan_skips_errored_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("ok")).unwrap();
        fs::write(tmp.path().join("ok/match.log"), b"x").unwrap();

        let search = SearchScanConfig {
            search_file_names: None,
            search_file_extensions: Some(vec!["log".to_string()]),
        };
        let result = search_scan(&config(), tmp.path().to_str().unwrap(), &search).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.contains_key(Path::new(&tmp.path().join("ok"))));
    }

    #[test]
    fn missing_root_surfaces_as_error_projection_not_err() {
        let projection =
            shallow_scan(&config(), "/definitely/does/not/exist/meshfs").unwrap();
        assert!(projection.error.is_some());
    }
}
