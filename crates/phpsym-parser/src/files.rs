//! Project file enumeration.
//!
//! Results are ordered shallowest-first, then by path, so "first match wins"
//! lookups over them are reproducible.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// Custom ignore file honoured in addition to `.gitignore`.
pub const IGNORE_FILENAME: &str = ".phpsymignore";

/// Options shared by every walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    pub respect_gitignore: bool,
    /// Glob patterns relative to the walk root.
    pub exclude: Vec<String>,
}

impl WalkOptions {
    pub fn new(respect_gitignore: bool) -> Self {
        Self {
            respect_gitignore,
            exclude: Vec::new(),
        }
    }
}

/// Collect files under `root` whose extension is in `extensions` (case-insensitive).
pub fn collect_source_files(
    root: &Path,
    extensions: &[String],
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    walk(root, options, |path| {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    })
}

/// Collect every file named exactly `file_name` under `root`.
pub fn find_named(root: &Path, file_name: &str, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    walk(root, options, |path| {
        path.file_name().and_then(|n| n.to_str()) == Some(file_name)
    })
}

fn walk(
    root: &Path,
    options: &WalkOptions,
    mut keep: impl FnMut(&Path) -> bool,
) -> Result<Vec<PathBuf>> {
    let exclude_set = build_glob_set(&options.exclude)?;

    let walker = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .add_custom_ignore_filename(IGNORE_FILENAME)
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("skipping unreadable walk entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) || !keep(path) {
            continue;
        }
        let rel_path = path.strip_prefix(root).unwrap_or(path);
        if let Some(ref exc) = exclude_set
            && exc.is_match(rel_path)
        {
            continue;
        }
        files.push(path.to_path_buf());
    }

    sort_paths(&mut files);
    Ok(files)
}

/// Sort by component depth, then lexicographically.
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| {
        a.components()
            .count()
            .cmp(&b.components().count())
            .then_with(|| a.cmp(b))
    });
}

fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for p in patterns {
        builder.add(Glob::new(p).with_context(|| format!("invalid exclude glob: {}", p))?);
    }
    Ok(Some(builder.build().context("invalid exclude glob set")?))
}
