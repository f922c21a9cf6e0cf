//! Project scans: enumerate PHP sources and extract them into a symbol table.

use crate::extract::{extract_file, extract_files};
use anyhow::{Context, Result};
use phpsym_core::config::PhpsymConfig;
use phpsym_core::table::SymbolTable;
use phpsym_parser::files::{WalkOptions, collect_source_files};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Enumerate the configured source files under `root`.
pub async fn discover_sources(root: &Path, config: &PhpsymConfig) -> Result<Vec<PathBuf>> {
    let root = root.to_path_buf();
    let extensions = config.parser.extensions.clone();
    let options = WalkOptions {
        respect_gitignore: config.walk.respect_gitignore,
        exclude: config.walk.exclude.clone(),
    };
    tokio::task::spawn_blocking(move || collect_source_files(&root, &extensions, &options))
        .await
        .context("source discovery task failed")?
}

/// Scan the whole project into a fresh table.
///
/// Files are parsed in discovery order (shallowest first), but the table is
/// keyed by path, so `SymbolTable::to_records` and the JSON export list files
/// in plain path order. Use `extract_files` over `discover_sources` directly
/// when discovery order matters.
pub async fn index_project(root: &Path, config: &PhpsymConfig) -> Result<SymbolTable> {
    let files = discover_sources(root, config).await?;
    let file_count = files.len();

    let start = Instant::now();
    let records = extract_files(files, config.parser.max_concurrent_parses).await;
    tracing::info!(
        "indexed {} symbols from {} files in {:.2?} (max {} concurrent parses)",
        records.len(),
        file_count,
        start.elapsed(),
        config.parser.max_concurrent_parses,
    );

    Ok(SymbolTable::from_records(records))
}

/// Re-extract one file and replace its records. Returns the new record count.
pub async fn refresh_file(table: &mut SymbolTable, path: &Path) -> usize {
    let records = extract_file(path).await;
    let count = records.len();
    table.replace_file(path, records);
    tracing::debug!("refreshed {}: {} symbols", path.display(), count);
    count
}
