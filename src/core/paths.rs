//! Shared path manipulation utilities.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::core::errors::{MeshfsError, Result};

/// Normalize a scan root: expand a leading `~`, and treat any path that does
/// not start with `/` or `~` as relative to the home directory.
///
/// This differs from resolving relative to the current working directory —
/// a LAN-facing scan service has no meaningful "current directory" of its
/// own, and callers are expected to pass paths the way a user would type
/// them on their own machine (`~`, `~/Projects`, `/absolute/path`).
pub fn normalize_root(path: &str) -> Result<PathBuf> {
    let expanded = if let Some(rest) = path.strip_prefix('~') {
        let home = home_dir()?;
        if rest.is_empty() {
            home
        } else {
            home.join(rest.trim_start_matches('/'))
        }
    } else if path.starts_with('/') {
        PathBuf::from(path)
    } else {
        home_dir()?.join(path)
    };

    Ok(normalize_syntactic(&expanded))
}

/// Resolve the current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(MeshfsError::NoHomeDirectory)
}

/// Collapse `.`/`..` components without touching the filesystem.
///
/// Scan roots are not required to exist at normalization time (a missing
/// root simply yields an error-carrying `Bucket` later), so normalization
/// must stay purely syntactic rather than calling `fs::canonicalize`.
fn normalize_syntactic(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                }
            }
        }
    }
    components.into_iter().collect()
}
