//! Structured diagnostics returned alongside analysis results.
//!
//! Instead of printing status to stdout, every pipeline stage records
//! what it did (and what looked suspicious) as [`Diagnostic`] entries on
//! the result, so batch callers can aggregate or surface them.

use serde::Serialize;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Routine progress information
    Info,
    /// Something the caller should review (e.g. a totals mismatch)
    Warning,
}

/// The pipeline stage that emitted a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Word-to-line-to-block segmentation
    Segmenter,
    /// Block labeling
    Classifier,
    /// Field extraction
    Extractor,
    /// Line-item table extraction
    Table,
    /// Totals reconciliation
    Reconciler,
    /// Vendor profile rules
    Profiles,
}

/// One structured status entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Severity
    pub level: Level,
    /// Emitting stage
    pub stage: Stage,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create an info-level diagnostic.
    pub fn info(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            stage,
            message: message.into(),
        }
    }

    /// Create a warning-level diagnostic.
    pub fn warning(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            stage,
            message: message.into(),
        }
    }
}
