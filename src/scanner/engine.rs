//! Worker-pool breadth-first scan driver (C3).
//!
//! The protocol mirrors a counted-completion barrier: an in-flight counter is
//! incremented before a work item is enqueued and decremented after it is
//! fully processed; workers poll the queue with a short receive timeout so
//! they can observe the counter reaching zero and exit without a separate
//! shutdown signal.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crossbeam_channel as channel;

use crate::core::config::ScannerConfig;
use crate::scanner::bucket::Bucket;
use crate::scanner::walker::{self, SearchFilters};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run a full parallel breadth-first scan rooted at `root`.
///
/// If the root itself fails to enumerate, its error bucket is returned
/// directly and no workers are started. Otherwise every discovered
/// subdirectory is visited exactly once, with per-directory errors isolated
/// onto their own bucket.
pub fn scan(config: &ScannerConfig, root: &std::path::Path, filters: &SearchFilters<'_>) -> Bucket {
    let root_bucket = walker::skim_root(config, root, filters);
    if root_bucket.is_errored() || root_bucket.children.is_empty() {
        return root_bucket;
    }

    // Unbounded: the worker count is `min(#immediate-children, MAX_WORKERS)`
    // per the scan protocol, so a single worker is common (a root with one
    // subdirectory) — that worker is both the sole producer and sole
    // consumer of this channel, and a bounded channel would deadlock it the
    // moment a directory with more immediate children than the channel's
    // capacity tried to enqueue its discoveries.
    let (work_tx, work_rx) = channel::unbounded::<PathBuf>();
    let (result_tx, result_rx) = channel::unbounded::<(PathBuf, Bucket)>();
    let in_flight = AtomicUsize::new(0);

    for child in root_bucket.children.values() {
        in_flight.fetch_add(1, Ordering::SeqCst);
        let _ = work_tx.send(child.path.clone());
    }

    let worker_count = root_bucket.children.len().min(config.max_workers.max(1));

    std::thread::scope(|scope| {
        for _ in 0..worker_count {
            let work_rx = work_rx.clone();
            let work_tx = work_tx.clone();
            let result_tx = result_tx.clone();
            let in_flight = &in_flight;
            scope.spawn(move || worker_loop(config, filters, &work_rx, &work_tx, &result_tx, in_flight));
        }
        drop(work_tx);
        drop(result_tx);
    });

    let results: HashMap<PathBuf, Bucket> = result_rx.iter().collect();
    stitch(root_bucket, &results)
}

fn worker_loop(
    config: &ScannerConfig,
    filters: &SearchFilters<'_>,
    work_rx: &channel::Receiver<PathBuf>,
    work_tx: &channel::Sender<PathBuf>,
    result_tx: &channel::Sender<(PathBuf, Bucket)>,
    in_flight: &AtomicUsize,
) {
    loop {
        match work_rx.recv_timeout(POLL_INTERVAL) {
            Ok(dir_path) => {
                let bucket = walker::skim(config, &dir_path, filters);
                for child in bucket.children.values() {
                    in_flight.fetch_add(1, Ordering::SeqCst);
                    if work_tx.send(child.path.clone()).is_err() {
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                    }
                }
                let _ = result_tx.send((dir_path, bucket));
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }
            Err(channel::RecvTimeoutError::Timeout) => {
                if in_flight.load(Ordering::SeqCst) == 0 {
                    return;
                }
            }
            Err(channel::RecvTimeoutError::Disconnected) => return,
        }
    }
}

/// Rebuild the full tree: every stub child produced by a skim is replaced by
/// its corresponding fully-skimmed bucket (which itself has stub children,
/// recursively stitched the same way).
fn stitch(mut bucket: Bucket, results: &HashMap<PathBuf, Bucket>) -> Bucket {
    for (name, child_stub) in std::mem::take(&mut bucket.children) {
        let filled = results.get(&child_stub.path).cloned().unwrap_or(child_stub);
        bucket.children.insert(name, stitch(filled, results));
    }
    bucket
}
