//! Configuration for phpsym scanning.
//!
//! Load order: `.phpsym/config.toml` → environment variables → defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of files parsed concurrently.
pub const DEFAULT_MAX_CONCURRENT_PARSES: usize = 5;

/// Top-level phpsym configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhpsymConfig {
    pub parser: ParserConfig,
    pub walk: WalkConfig,
}

/// Parser scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Upper bound on files read and parsed at the same time.
    /// Also bounds open file handles during a scan.
    pub max_concurrent_parses: usize,
    /// File extensions treated as PHP sources (without the dot).
    pub extensions: Vec<String>,
}

/// File enumeration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Skip files matched by `.gitignore` (inside git repositories).
    pub respect_gitignore: bool,
    /// Glob patterns, relative to the project root, excluded from scans.
    pub exclude: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_concurrent_parses: DEFAULT_MAX_CONCURRENT_PARSES,
            extensions: vec!["php".to_string()],
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            respect_gitignore: true,
            exclude: Vec::new(),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl PhpsymConfig {
    /// Load config from `.phpsym/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".phpsym").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        config.parser.extensions = std::mem::take(&mut config.parser.extensions)
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();

        env_override(
            "PHPSYM_MAX_CONCURRENT_PARSES",
            &mut config.parser.max_concurrent_parses,
        );
        env_override(
            "PHPSYM_RESPECT_GITIGNORE",
            &mut config.walk.respect_gitignore,
        );

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.parser.max_concurrent_parses == 0 {
            anyhow::bail!("parser.max_concurrent_parses must be at least 1");
        }
        if self.parser.extensions.is_empty() {
            anyhow::bail!("parser.extensions must name at least one extension");
        }
        Ok(())
    }

    /// Whether `ext` (no dot, any case) is a configured source extension.
    pub fn is_source_extension(&self, ext: &str) -> bool {
        self.parser
            .extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}
