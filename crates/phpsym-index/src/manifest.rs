//! Symfony version detection from Composer manifests.
//!
//! Lock files are consulted first (they pin the installed version), then
//! `composer.json` constraints, then downstream distributions whose own major
//! version implies a Symfony major. The first file that yields a version wins;
//! results from different files are never merged.

use crate::jsonc;
use phpsym_core::symbol::VersionFact;
use phpsym_parser::files::{WalkOptions, find_named};
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const LOCK_MANIFEST: &str = "composer.lock";
pub const DECLARATIVE_MANIFEST: &str = "composer.json";

/// Package names that carry the Symfony version, in lookup order.
pub const FRAMEWORK_PACKAGES: [&str; 2] = ["symfony/framework-bundle", "symfony/symfony"];

/// A distribution built on Symfony whose major version implies Symfony's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownstreamRule {
    pub package: &'static str,
    /// Lowest distribution major this rule applies to.
    pub min_major: u64,
    pub framework_major: u64,
}

/// Known downstream distributions. When several rules for the same package
/// match, the one with the highest `min_major` applies.
pub const DOWNSTREAM_RULES: &[DownstreamRule] = &[
    // Pimcore 11 runs on Symfony 6.
    DownstreamRule {
        package: "pimcore/pimcore",
        min_major: 11,
        framework_major: 6,
    },
];

/// Errors from version resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no Symfony installation detected under {}", root.display())]
    NotDetected { root: PathBuf },
}

/// Which kind of manifest a fact was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Lock,
    Declarative,
}

impl ManifestKind {
    fn file_name(self) -> &'static str {
        match self {
            Self::Lock => LOCK_MANIFEST,
            Self::Declarative => DECLARATIVE_MANIFEST,
        }
    }
}

/// Resolve the Symfony major version of the project under `root`.
pub fn resolve(root: &Path) -> Result<VersionFact, ResolveError> {
    resolve_with(root, &WalkOptions::new(true))
}

/// [`resolve`] with explicit walk options.
pub fn resolve_with(root: &Path, options: &WalkOptions) -> Result<VersionFact, ResolveError> {
    for kind in [ManifestKind::Lock, ManifestKind::Declarative] {
        for path in manifest_files(root, kind, options) {
            if let Some(major_version) = read_manifest(&path, kind) {
                tracing::debug!(
                    "Symfony {} detected from {}",
                    major_version,
                    path.display()
                );
                return Ok(VersionFact {
                    major_version,
                    source: path,
                });
            }
        }
    }

    Err(ResolveError::NotDetected {
        root: root.to_path_buf(),
    })
}

fn manifest_files(root: &Path, kind: ManifestKind, options: &WalkOptions) -> Vec<PathBuf> {
    match find_named(root, kind.file_name(), options) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("failed to enumerate {} files: {:#}", kind.file_name(), e);
            Vec::new()
        }
    }
}

/// Read one manifest. Unreadable or malformed files are logged and skipped.
fn read_manifest(path: &Path, kind: ManifestKind) -> Option<u64> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("failed reading {}: {}", path.display(), e);
            return None;
        }
    };
    let json = match jsonc::parse(&content) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("failed parsing {}: {}", path.display(), e);
            return None;
        }
    };
    match kind {
        ManifestKind::Lock => version_from_lock(&json),
        ManifestKind::Declarative => version_from_require(&json),
    }
}

/// Look through `packages` then `packages-dev` for the first framework package.
///
/// A framework package with a version string settles the file, even when the
/// string has no digits (`dev-master` yields major 0).
pub fn version_from_lock(lock: &Value) -> Option<u64> {
    let package = ["packages", "packages-dev"]
        .iter()
        .filter_map(|section| lock.get(section).and_then(Value::as_array))
        .flatten()
        .find(|p| {
            p.get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| FRAMEWORK_PACKAGES.contains(&name))
        })?;
    package
        .get("version")
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .map(|v| major_version(v).unwrap_or(0))
}

/// Inspect `require` for a direct framework constraint, then downstream rules.
///
/// A direct constraint without digits (`*`) still settles the file as major 0.
pub fn version_from_require(manifest: &Value) -> Option<u64> {
    let require = manifest.get("require").and_then(Value::as_object)?;

    let direct = FRAMEWORK_PACKAGES
        .iter()
        .find_map(|name| require.get(*name).and_then(Value::as_str))
        .filter(|c| !c.is_empty());
    if let Some(constraint) = direct {
        return Some(major_version(constraint).unwrap_or(0));
    }

    DOWNSTREAM_RULES
        .iter()
        .filter(|rule| {
            require
                .get(rule.package)
                .and_then(Value::as_str)
                .and_then(major_version)
                .is_some_and(|major| major >= rule.min_major)
        })
        .max_by_key(|rule| rule.min_major)
        .map(|rule| rule.framework_major)
}

/// Major version of an exact version or a Composer constraint.
///
/// Exact versions (`5.4.2`, `v6.3.0`) go through semver; anything else
/// (`^6.0`, `~5.4|^6.0`, `6.4.*`) takes the first run of digits.
pub fn major_version(version: &str) -> Option<u64> {
    let trimmed = version.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if let Ok(parsed) = semver::Version::parse(bare) {
        return Some(parsed.major);
    }

    static DIGITS_RE: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS_RE.get_or_init(|| Regex::new(r"\d+").unwrap());
    re.find(trimmed).and_then(|m| m.as_str().parse().ok())
}
