//! The scan result tree and its wire representation.
//!
//! Internally a [`Bucket`] is a plain tagged struct. At the serialization
//! boundary it is emitted as a JSON object carrying the distinguished keys
//! `__path__`, `__files__`, an optional `__error__`, with every subdirectory
//! flattened in as a sibling key — this is the shape the original
//! dict-based implementation produced, but without the key-collision hazard
//! a bare `dict[str, Any]` carries (a subdirectory literally named
//! `__files__` would have clobbered the files list).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One node of a scan result tree — one per directory visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub path: PathBuf,
    pub files: Vec<String>,
    pub error: Option<String>,
    pub children: BTreeMap<String, Bucket>,
}

impl Bucket {
    /// A bucket for a directory that was never successfully enumerated.
    #[must_use]
    pub fn errored(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            files: Vec::new(),
            error: Some(message.into()),
            children: BTreeMap::new(),
        }
    }

    /// A fresh, empty bucket for a directory about to be enumerated.
    #[must_use]
    pub fn empty(path: PathBuf) -> Self {
        Self {
            path,
            files: Vec::new(),
            error: None,
            children: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_errored(&self) -> bool {
        self.error.is_some()
    }

    /// Project this bucket to the shallow wire shape: immediate
    /// subdirectory names and files only, no recursion.
    #[must_use]
    pub fn shallow(&self) -> ShallowProjection {
        ShallowProjection {
            path: self.path.clone(),
            dirs: self.children.keys().cloned().collect(),
            files: self.files.clone(),
            error: self.error.clone(),
        }
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 2 + usize::from(self.error.is_some()) + self.children.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("__path__", &self.path)?;
        map.serialize_entry("__files__", &self.files)?;
        if let Some(error) = &self.error {
            map.serialize_entry("__error__", error)?;
        }
        for (name, child) in &self.children {
            map.serialize_entry(name, child)?;
        }
        map.end()
    }
}

/// Shallow-scan wire shape: `{path, dirs, files, error?}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ShallowProjection {
    pub path: PathBuf,
    pub dirs: Vec<String>,
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate counts over a scan result tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Summary {
    pub error_count: u64,
    pub dir_count: u64,
    pub file_count: u64,
}

/// Fold a bucket tree into its [`Summary`] via a postorder walk.
///
/// `dir_count` counts every child-bucket key across the tree (the root
/// itself is never counted); `file_count` sums `files.len()` across every
/// bucket including the root; `error_count` counts buckets carrying `error`.
#[must_use]
pub fn summarize(bucket: &Bucket) -> Summary {
    let mut summary = Summary::default();
    accumulate(bucket, &mut summary);
    summary
}

fn accumulate(bucket: &Bucket, summary: &mut Summary) {
    if bucket.is_errored() {
        summary.error_count += 1;
    }
    summary.file_count += bucket.files.len() as u64;
    for child in bucket.children.values() {
        summary.dir_count += 1;
        accumulate(child, summary);
    }
}

/// Flatten a tree into `absolute_dir_path -> matched files`, skipping
/// buckets with no matches and buckets that carry an error.
#[must_use]
pub fn flatten_matches(bucket: &Bucket) -> BTreeMap<PathBuf, Vec<String>> {
    let mut out = BTreeMap::new();
    flatten_into(bucket, &mut out);
    out
}

fn flatten_into(bucket: &Bucket, out: &mut BTreeMap<PathBuf, Vec<String>>) {
    if bucket.is_errored() {
        return;
    }
    if !bucket.files.is_empty() {
        out.insert(bucket.path.clone(), bucket.files.clone());
    }
    for child in bucket.children.values() {
        flatten_into(child, out);
    }
}

#[must_use]
pub fn child_path(parent: &Path, name: &str) -> PathBuf {
    parent.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: &str, files: &[&str]) -> Bucket {
        Bucket {
            path: PathBuf::from(path),
            files: files.iter().map(ToString::to_string).collect(),
            error: None,
            children: BTreeMap::new(),
        }
    }

    #[test]
    fn summary_counts_nested_tree() {
        let mut root = leaf("/root", &["a.txt"]);
        let mut child = leaf("/root/child", &["b.txt", "c.txt"]);
        child
            .children
            .insert("grandchild".to_string(), leaf("/root/child/grandchild", &[]));
        root.children.insert("child".to_string(), child);

        let summary = summarize(&root);
        assert_eq!(summary.dir_count, 2);
        assert_eq!(summary.file_count, 3);
        assert_eq!(summary.error_count, 0);
    }

    #[test]
    fn summary_counts_errors() {
        let mut root = leaf("/root", &[]);
        root.children.insert(
            "broken".to_string(),
            Bucket::errored(PathBuf::from("/root/broken"), "denied"),
        );
        let summary = summarize(&root);
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.dir_count, 1);
    }

    #[test]
    fn errored_bucket_has_no_children_and_no_files() {
        let bucket = Bucket::errored(PathBuf::from("/x"), "nope");
        assert!(bucket.children.is_empty());
        assert!(bucket.files.is_empty());
    }

    #[test]
    fn serializes_with_distinguished_keys_and_flattened_children() {
        let mut root = leaf("/root", &["a.txt"]);
        root.children
            .insert("child".to_string(), leaf("/root/child", &["b.txt"]));

        let value = serde_json::to_value(&root).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["__path__"], "/root");
        assert_eq!(obj["__files__"], serde_json::json!(["a.txt"]));
        assert!(obj.contains_key("child"));
        assert_eq!(obj["child"]["__path__"], "/root/child");
    }

    #[test]
    fn errored_bucket_serializes_error_key() {
        let bucket = Bucket::errored(PathBuf::from("/x"), "denied");
        let value = serde_json::to_value(&bucket).unwrap();
        assert_eq!(value["__error__"], "denied");
    }

    #[test]
    fn flatten_skips_empty_and_errored_buckets() {
        let mut root = leaf("/root", &[]);
        root.children
            .insert("matches".to_string(), leaf("/root/matches", &["hit.png"]));
        root.children.insert(
            "empty".to_string(),
            leaf("/root/empty", &[]),
        );
        root.children.insert(
            "broken".to_string(),
            Bucket::errored(PathBuf::from("/root/broken"), "denied"),
        );

        let flat = flatten_matches(&root);
        assert_eq!(flat.len(), 1);
        assert_eq!(
            flat.get(&PathBuf::from("/root/matches")),
            Some(&vec!["hit.png".to_string()])
        );
    }

    #[test]
    fn child_path_joins_parent_and_name() {
        assert_eq!(
            child_path(Path::new("/a/b"), "c"),
            PathBuf::from("/a/b/c")
        );
    }
}
