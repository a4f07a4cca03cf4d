//! Single-directory enumeration ("skim") producing one [`Bucket`] (C2).
//!
//! This never recurses — that is the scan engine's job (`scanner::engine`).
//! It never follows symlinks: `DirEntry::file_type` reflects the entry
//! itself (an `lstat`), so a symlinked directory is neither descended into
//! nor recorded as a child bucket, and a symlinked file is never recorded.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::config::ScannerConfig;
use crate::scanner::bucket::Bucket;
use crate::scanner::filter;

/// Search-only filters layered on top of the base scanner config.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters<'a> {
    pub search_file_names: Option<&'a [String]>,
    pub search_file_extensions: Option<&'a [String]>,
}

/// Enumerate a single directory into a [`Bucket`].
///
/// On any enumeration failure (permission denied, path vanished mid-scan,
/// or any other I/O error), the returned bucket carries `error` and no
/// children or files — partial work is discarded, matching the
/// all-or-nothing semantics of a single directory read.
pub fn skim(config: &ScannerConfig, path: &Path, filters: &SearchFilters<'_>) -> Bucket {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => return Bucket::errored(path.to_path_buf(), describe_io_error(&err)),
    };

    let mut bucket = Bucket::empty(path.to_path_buf());

    for entry in entries {
        let Ok(entry) = entry else {
            continue;
        };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_symlink() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();

        if file_type.is_dir() {
            if filter::ignore_dir(config, &entry.path(), &name) {
                continue;
            }
            bucket
                .children
                .insert(name.clone(), Bucket::empty(entry.path()));
        } else if file_type.is_file()
            && filter::consider_file(
                config,
                &name,
                filters.search_file_names,
                filters.search_file_extensions,
            )
        {
            bucket.files.push(name);
        }
    }

    bucket
}

fn describe_io_error(err: &std::io::Error) -> String {
    match err.kind() {
        ErrorKind::NotFound => "path does not exist".to_string(),
        ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => err.to_string(),
    }
}

/// Resolve a root path to its first [`Bucket`] (the "skim" of the scan
/// root). Used directly by `shallow_scan`; used as the seed step of
/// `deep_scan`/`search_scan` before the worker pool takes over.
pub fn skim_root(config: &ScannerConfig, root: &Path, filters: &SearchFilters<'_>) -> Bucket {
    if !root.exists() {
        return Bucket::errored(root.to_path_buf(), "path does not exist");
    }
    skim(config, root, filters)
}
