//! The analysis pipeline.
//!
//! ```text
//! words ──> Segmenter ──> Classifier ──> FieldExtractor ──┐
//!   │                                                     ├──> reconcile ──> profiles ──> Analysis
//!   └────────────────────> TableExtractor ────────────────┘
//! ```
//!
//! One document in, one result out. The pipeline is pure and
//! synchronous: it owns no state between calls, takes immutable input
//! and touches nothing outside its return value, so callers can run one
//! analyzer per worker or share one across threads.

use crate::classify::{label_blocks, BlockLabel, LabeledBlock};
use crate::config::AnalyzerConfig;
use crate::diagnostics::{Diagnostic, Stage};
use crate::error::Result;
use crate::extract::FieldExtractor;
use crate::fields::FieldMap;
use crate::layout::{Segmenter, Word};
use crate::profiles::ProfileRegistry;
use crate::reconcile::{reconcile, ReconciliationStatus};
use crate::table::{LineItem, TableExtractor};
use log::info;
use serde::Serialize;

/// Everything the pipeline derived from one document.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Extracted fields with provenance
    pub fields: FieldMap,
    /// Extracted table rows
    pub line_items: Vec<LineItem>,
    /// Outcome of the totals check
    pub reconciliation: ReconciliationStatus,
    /// Names of the profile rules that ran
    pub profiles_applied: Vec<&'static str>,
    /// Structured status from every stage
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    fn empty() -> Self {
        Self {
            fields: FieldMap::new(),
            line_items: Vec::new(),
            reconciliation: ReconciliationStatus::Clean,
            profiles_applied: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

/// The invoice analysis pipeline.
///
/// # Examples
///
/// ```
/// use invoice_oxide::{Analyzer, Word};
/// use invoice_oxide::geometry::BoundingBox;
///
/// let analyzer = Analyzer::new();
/// let words = vec![
///     Word::new("Genel", BoundingBox::new(10.0, 10.0, 50.0, 10.0), 96),
///     Word::new("Toplam:", BoundingBox::new(70.0, 10.0, 60.0, 10.0), 96),
///     Word::new("118,00", BoundingBox::new(140.0, 10.0, 55.0, 10.0), 97),
/// ];
/// let analysis = analyzer.analyze(&words).unwrap();
/// let total = analysis.fields.get(invoice_oxide::FieldKind::GrandTotal).unwrap();
/// assert_eq!(total.value, "118.00");
/// ```
pub struct Analyzer {
    config: AnalyzerConfig,
    profiles: ProfileRegistry,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with the default configuration and the
    /// production profile rules.
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            profiles: ProfileRegistry::default(),
        }
    }

    /// Create an analyzer with a custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            profiles: ProfileRegistry::default(),
        }
    }

    /// Replace the profile rule registry.
    pub fn with_profiles(mut self, profiles: ProfileRegistry) -> Self {
        self.profiles = profiles;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one page of OCR words.
    ///
    /// Empty input yields an empty [`Analysis`]; the only error is
    /// structurally invalid word geometry.
    pub fn analyze(&self, words: &[Word]) -> Result<Analysis> {
        let segmentation = Segmenter::new(&self.config).segment(words)?;
        if segmentation.is_empty() {
            let mut analysis = Analysis::empty();
            analysis.diagnostics.push(Diagnostic::info(
                Stage::Segmenter,
                "no confident words on the page",
            ));
            return Ok(analysis);
        }

        let mut diagnostics = vec![Diagnostic::info(
            Stage::Segmenter,
            format!(
                "{} lines in {} blocks",
                segmentation.lines.len(),
                segmentation.blocks.len()
            ),
        )];

        let labeled = label_blocks(&segmentation.blocks, &self.config);
        diagnostics.push(Diagnostic::info(
            Stage::Classifier,
            summarize_labels(&labeled),
        ));

        let raw_text = segmentation.text();

        let mut fields =
            FieldExtractor::new(&self.config).extract(&segmentation, &labeled, &raw_text);
        diagnostics.push(Diagnostic::info(
            Stage::Extractor,
            format!("{} fields extracted", fields.len()),
        ));

        let line_items = TableExtractor::new(&self.config).extract(&segmentation.lines);
        diagnostics.push(Diagnostic::info(
            Stage::Table,
            format!("{} line items", line_items.len()),
        ));

        let reconciliation = reconcile(&mut fields, self.config.amount_epsilon);
        match &reconciliation {
            ReconciliationStatus::Mismatch { difference } => {
                diagnostics.push(Diagnostic::warning(
                    Stage::Reconciler,
                    format!("grand total off by {:.2}", difference),
                ));
            }
            ReconciliationStatus::AutoCorrected => {
                diagnostics.push(Diagnostic::info(
                    Stage::Reconciler,
                    "grand total derived from subtotal + tax",
                ));
            }
            ReconciliationStatus::Clean => {}
        }

        let profiles_applied = self.profiles.apply_all(&mut fields, &raw_text);
        if !profiles_applied.is_empty() {
            diagnostics.push(Diagnostic::info(
                Stage::Profiles,
                format!("applied: {}", profiles_applied.join(", ")),
            ));
        }

        info!(
            "analysis complete: {} fields, {} items, {:?}",
            fields.len(),
            line_items.len(),
            reconciliation
        );

        Ok(Analysis {
            fields,
            line_items,
            reconciliation,
            profiles_applied,
            diagnostics,
        })
    }
}

fn summarize_labels(labeled: &[LabeledBlock]) -> String {
    let count = |label: BlockLabel| labeled.iter().filter(|lb| lb.label == label).count();
    format!(
        "{} seller, {} buyer, {} totals, {} bank, {} other",
        count(BlockLabel::Seller),
        count(BlockLabel::Buyer),
        count(BlockLabel::Totals),
        count(BlockLabel::Bank),
        count(BlockLabel::Other)
    )
}
