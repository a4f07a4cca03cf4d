//! Filter predicates deciding which directories and files are in scope (C1).

use std::path::Path;

use crate::core::config::ScannerConfig;

/// Whether a directory should be skipped entirely.
///
/// A directory is ignored if its basename or its full path appears in
/// `ignore_dirs`, or if it is hidden (basename starts with `.`) and hidden
/// directories are not being scanned. Directory-name matching is
/// case-sensitive.
pub fn ignore_dir(config: &ScannerConfig, path: &Path, name: &str) -> bool {
    if config.ignore_dirs.contains(name) {
        return true;
    }
    if config.ignore_dirs.contains(&path.to_string_lossy().into_owned()) {
        return true;
    }
    if !config.scan_hidden_dirs && is_hidden(name) {
        return true;
    }
    false
}

/// Whether a file belongs in the scan result.
///
/// Hidden-file policy is applied first; when `search_file_names` and/or
/// `search_file_extensions` are non-empty, the file must additionally match
/// at least one entry of each non-empty set. All name/extension comparisons
/// are case-insensitive.
pub fn consider_file(
    config: &ScannerConfig,
    name: &str,
    search_file_names: Option<&[String]>,
    search_file_extensions: Option<&[String]>,
) -> bool {
    if !config.scan_hidden_files && is_hidden(name) {
        return false;
    }

    let lower_name = name.to_lowercase();

    if let Some(names) = search_file_names
        && !names.is_empty()
        && !names
            .iter()
            .any(|n| lower_name.contains(&n.to_lowercase()))
    {
        return false;
    }

    if let Some(exts) = search_file_extensions
        && !exts.is_empty()
        && !exts
            .iter()
            .any(|ext| lower_name.ends_with(&format!(".{}", ext.to_lowercase())))
    {
        return false;
    }

    true
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config() -> ScannerConfig {
        ScannerConfig::default()
    }

    #[test]
    fn ignores_by_name() {
        let mut cfg = config();
        cfg.ignore_dirs.insert("node_modules".to_string());
        assert!(ignore_dir(&cfg, Path::new("/a/node_modules"), "node_modules"));
        assert!(!ignore_dir(&cfg, Path::new("/a/src"), "src"));
    }

    #[test]
    fn ignores_by_full_path() {
        let mut cfg = config();
        cfg.ignore_dirs
            .insert("/a/b/secret".to_string());
        assert!(ignore_dir(&cfg, &PathBuf::from("/a/b/secret"), "secret"));
    }

    #[test]
    fn hidden_dirs_ignored_unless_enabled() {
        let mut cfg = config();
        cfg.scan_hidden_dirs = false;
        assert!(ignore_dir(&cfg, Path::new("/a/.git"), ".git"));
        cfg.scan_hidden_dirs = true;
        assert!(!ignore_dir(&cfg, Path::new("/a/.git"), ".git"));
    }

    #[test]
    fn hidden_files_excluded_unless_enabled() {
        let mut cfg = config();
        cfg.scan_hidden_files = false;
        assert!(!consider_file(&cfg, ".env", None, None));
        cfg.scan_hidden_files = true;
        assert!(consider_file(&cfg, ".env", None, None));
    }

    #[test]
    fn name_search_is_case_insensitive_substring() {
        let cfg = config();
        let names = vec!["Dog".to_string()];
        assert!(consider_file(&cfg, "my_doggo.png", Some(&names), None));
        assert!(!consider_file(&cfg, "cat.png", Some(&names), None));
    }

    #[test]
    fn extension_search_is_case_insensitive() {
        let cfg = config();
        let exts = vec!["PNG".to_string()];
        assert!(consider_file(&cfg, "photo.png", None, Some(&exts)));
        assert!(consider_file(&cfg, "photo.PNG", None, Some(&exts)));
        assert!(!consider_file(&cfg, "photo.jpg", None, Some(&exts)));
    }

    #[test]
    fn empty_filters_impose_no_constraint() {
        let cfg = config();
        assert!(consider_file(&cfg, "anything.bin", Some(&[]), Some(&[])));
    }

    #[test]
    fn both_name_and_extension_filters_must_match() {
        let cfg = config();
        let names = vec!["report".to_string()];
        let exts = vec!["pdf".to_string()];
        assert!(consider_file(&cfg, "report.pdf", Some(&names), Some(&exts)));
        assert!(!consider_file(&cfg, "report.docx", Some(&names), Some(&exts)));
        assert!(!consider_file(&cfg, "summary.pdf", Some(&names), Some(&exts)));
    }
}
