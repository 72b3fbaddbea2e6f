//! Configuration for invoice analysis.

/// Tuning knobs for the analysis pipeline.
///
/// The defaults are the empirically tuned values used in production;
/// override them per deployment with the `with_*` builders.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Words below this OCR confidence (0-100) are ignored.
    pub min_confidence: u8,

    /// A word joins a line while its vertical offset from the line's
    /// anchor word is under `avg_word_height * line_tolerance_factor`.
    pub line_tolerance_factor: f32,

    /// A line joins a block while the gap to the previous line is under
    /// `avg_word_height * block_gap_factor`.
    pub block_gap_factor: f32,

    /// A table cell word is assigned to its nearest column anchor only
    /// if the distance is within `column_snap_factor` of the average
    /// inter-column gap.
    pub column_snap_factor: f32,

    /// When both seller and buyer lexicons score a block, the higher
    /// score wins only if it exceeds the lower by this ratio.
    pub dominance_ratio: f32,

    /// Maximum tolerated difference between the stated grand total and
    /// `subtotal + tax` before the document is flagged.
    pub amount_epsilon: f64,

    /// Maximum number of lines collected by the multiline address search.
    pub max_address_lines: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerConfig {
    /// Create a configuration with production defaults.
    pub fn new() -> Self {
        Self {
            min_confidence: 30,
            line_tolerance_factor: 0.4,
            block_gap_factor: 1.5,
            column_snap_factor: 0.75,
            dominance_ratio: 1.5,
            amount_epsilon: 0.02,
            max_address_lines: 3,
        }
    }

    /// Set the OCR confidence floor.
    pub fn with_min_confidence(mut self, value: u8) -> Self {
        self.min_confidence = value;
        self
    }

    /// Set the line grouping tolerance factor.
    pub fn with_line_tolerance_factor(mut self, value: f32) -> Self {
        self.line_tolerance_factor = value;
        self
    }

    /// Set the block gap factor.
    pub fn with_block_gap_factor(mut self, value: f32) -> Self {
        self.block_gap_factor = value;
        self
    }

    /// Set the table column snap factor.
    pub fn with_column_snap_factor(mut self, value: f32) -> Self {
        self.column_snap_factor = value;
        self
    }

    /// Set the seller/buyer dominance ratio.
    pub fn with_dominance_ratio(mut self, value: f32) -> Self {
        self.dominance_ratio = value;
        self
    }

    /// Set the totals reconciliation tolerance.
    pub fn with_amount_epsilon(mut self, value: f64) -> Self {
        self.amount_epsilon = value;
        self
    }

    /// Set the multiline address line limit.
    pub fn with_max_address_lines(mut self, value: usize) -> Self {
        self.max_address_lines = value;
        self
    }
}
