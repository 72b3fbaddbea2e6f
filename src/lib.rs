//! # invoice_oxide
//!
//! Layout-aware field extraction for invoice OCR output.
//!
//! OCR engines hand back a flat, unordered list of words with bounding
//! boxes and confidences. This crate turns that list into structured
//! invoice data:
//!
//! - **Segmentation**: words are regrouped into lines and blocks with
//!   thresholds that adapt to the document's resolution
//! - **Classification**: blocks are labeled seller / buyer / totals /
//!   bank via weighted keyword lexicons
//! - **Extraction**: each field runs an ordered strategy chain (anchored
//!   same-line search, multiline capture, document-wide patterns,
//!   largest-amount heuristic) and records which strategy produced it
//! - **Tables**: line items are recovered from the header band's column
//!   positions
//! - **Validation & normalization**: checksummed identifiers, canonical
//!   amounts and dates
//! - **Reconciliation**: the subtotal/tax/grand-total arithmetic is
//!   checked, repaired within tolerance, or flagged
//! - **Vendor profiles**: per-issuer rules fill and normalize fields as
//!   the final pass
//!
//! The pipeline is pure and synchronous; batch scheduling, OCR
//! invocation and report generation belong to the caller.
//!
//! ## Quick start
//!
//! ```
//! use invoice_oxide::{Analyzer, FieldKind, Word};
//! use invoice_oxide::geometry::BoundingBox;
//!
//! # fn main() -> invoice_oxide::Result<()> {
//! let words = vec![
//!     Word::new("Vergi", BoundingBox::new(10.0, 10.0, 50.0, 10.0), 96),
//!     Word::new("No:", BoundingBox::new(70.0, 10.0, 35.0, 10.0), 96),
//!     Word::new("1234567890", BoundingBox::new(115.0, 10.0, 90.0, 10.0), 93),
//! ];
//!
//! let analysis = Analyzer::new().analyze(&words)?;
//! let tax_id = analysis.fields.get(FieldKind::SellerTaxId).unwrap();
//! assert_eq!(tax_id.value, "1234567890");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Layout analysis
pub mod geometry;
pub mod layout;

// Semantic labeling
pub mod classify;

// Field extraction
pub mod extract;
pub mod fields;
pub mod normalize;
pub mod validate;

// Line-item tables
pub mod table;

// Totals arithmetic
pub mod reconcile;

// Vendor profile rules
pub mod profiles;

// Pipeline orchestration
pub mod analyzer;
pub mod config;
pub mod diagnostics;

// Re-exports
pub use analyzer::{Analysis, Analyzer};
pub use classify::{BlockLabel, LabeledBlock};
pub use config::AnalyzerConfig;
pub use diagnostics::{Diagnostic, Level, Stage};
pub use error::{Error, Result};
pub use fields::{FieldKind, FieldMap, FieldValue, Strategy};
pub use layout::{Block, Line, Word};
pub use reconcile::ReconciliationStatus;
pub use table::LineItem;

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than
    /// all other values, so sorting never panics on NaN.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => {
                // Both are normal numbers, safe to unwrap
                a.partial_cmp(&b).unwrap()
            },
        }
    }

    /// Lowercase for keyword matching, with the combining dot that
    /// Turkish dotted İ leaves behind stripped so plain-ASCII keywords
    /// still match.
    pub fn fold_lower(text: &str) -> String {
        text.to_lowercase().replace('\u{0307}', "")
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan() {
            assert_eq!(safe_float_cmp(f32::NAN, f32::NAN), Ordering::Equal);
            assert_eq!(safe_float_cmp(f32::NAN, 0.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.0, f32::NAN), Ordering::Less);
        }

        #[test]
        fn test_fold_lower_turkish() {
            assert_eq!(fold_lower("İSKONTO"), "iskonto");
            assert_eq!(fold_lower("FATURA"), "fatura");
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
