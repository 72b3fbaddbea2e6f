//! Error types for the invoice analysis library.
//!
//! Almost nothing in the pipeline is fatal: missing fields, failed
//! validations and totals mismatches are all reported through the result
//! surface. Only structurally broken input (impossible word geometry) is
//! an [`Error`].

/// Result type alias for invoice analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during invoice analysis.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A word in the OCR input carries impossible geometry (NaN or
    /// negative coordinates or dimensions). Aborts analysis of the
    /// current document only.
    #[error("Invalid geometry for word {index}: {reason}")]
    InvalidWordGeometry {
        /// Index of the offending word in the input slice
        index: usize,
        /// Reason the geometry was rejected
        reason: String,
    },
}
