//! Async per-file extraction on top of the synchronous parser.

use crate::scheduler::throttle_all;
use phpsym_core::symbol::SymbolRecord;
use phpsym_parser::extract::extract_symbols_from_bytes;
use std::path::{Path, PathBuf};

/// Read and parse one file. Any failure yields an empty list.
///
/// Parsing runs on the blocking pool; a panic there is caught by tokio and
/// also degrades to an empty list.
pub async fn extract_file(path: &Path) -> Vec<SymbolRecord> {
    let Ok(bytes) = tokio::fs::read(path).await else {
        return Vec::new();
    };
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || extract_symbols_from_bytes(&path, &bytes))
        .await
        .unwrap_or_default()
}

/// Extract every file with at most `limit` in flight, flattened in input order.
pub async fn extract_files(paths: Vec<PathBuf>, limit: usize) -> Vec<SymbolRecord> {
    let tasks: Vec<_> = paths
        .into_iter()
        .map(|path| move || async move { extract_file(&path).await })
        .collect();
    throttle_all(tasks, limit)
        .await
        .into_iter()
        .flatten()
        .collect()
}
