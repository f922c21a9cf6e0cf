//! JSON export of a scan, with version handling.

use crate::symbol::SymbolRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const CURRENT_VERSION: &str = "1.0.0";

/// Versioned envelope around an exported symbol list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolExport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub symbols: Vec<SymbolRecord>,
}

impl SymbolExport {
    pub fn new(symbols: Vec<SymbolRecord>) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            generated_at: Utc::now(),
            symbols,
        }
    }
}

/// Validate an export's schema version.
pub fn validate_version(export: &SymbolExport) -> Result<()> {
    if export.version != CURRENT_VERSION {
        anyhow::bail!(
            "symbol export version mismatch: expected {}, found {}",
            CURRENT_VERSION,
            export.version
        );
    }
    Ok(())
}

/// Serialize records to a pretty-printed JSON export.
pub fn to_json(symbols: &[SymbolRecord]) -> Result<String> {
    let export = SymbolExport::new(symbols.to_vec());
    serde_json::to_string_pretty(&export).context("failed to serialize symbols to JSON")
}

/// Deserialize records from a JSON export.
pub fn from_json(json: &str) -> Result<Vec<SymbolRecord>> {
    let export: SymbolExport =
        serde_json::from_str(json).context("failed to deserialize symbol export")?;
    validate_version(&export)?;
    Ok(export.symbols)
}
