//! Word-to-line-to-block segmentation.
//!
//! OCR engines emit words in no reliable order. The segmenter rebuilds
//! the page structure in two passes: words sharing a vertical band become
//! a line, and consecutive lines with small gaps become a block. Both
//! thresholds adapt to the document by scaling with the average word
//! height, so the same configuration handles 200 dpi and 600 dpi scans.

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::layout::{Block, Line, Word};
use crate::utils::safe_float_cmp;
use log::{debug, trace};

/// The result of segmenting one page of words.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// All lines on the page, ordered top to bottom
    pub lines: Vec<Line>,
    /// Lines grouped into blocks, ordered top to bottom
    pub blocks: Vec<Block>,
    /// Average height of the confident words, in page pixels
    pub avg_word_height: f32,
}

impl Segmentation {
    /// The full page text, lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when the page produced no usable content.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Groups raw OCR words into lines and blocks.
pub struct Segmenter<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> Segmenter<'a> {
    /// Create a segmenter with the given configuration.
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Segment a page of words into lines and blocks.
    ///
    /// Words below the configured confidence floor are ignored. An empty
    /// or fully-filtered input produces an empty segmentation, not an
    /// error. Words with NaN or negative geometry abort the document with
    /// [`Error::InvalidWordGeometry`].
    ///
    /// Identical input always yields identical line and block boundaries:
    /// ties are broken by the NaN-safe `(top, left)` sort and nothing
    /// else depends on input order.
    pub fn segment(&self, words: &[Word]) -> Result<Segmentation> {
        validate_geometry(words)?;

        let mut confident: Vec<&Word> = words
            .iter()
            .filter(|w| w.confidence >= self.config.min_confidence && !w.text.trim().is_empty())
            .collect();

        if confident.is_empty() {
            debug!("segmenter: no confident words, empty segmentation");
            return Ok(Segmentation {
                lines: Vec::new(),
                blocks: Vec::new(),
                avg_word_height: 0.0,
            });
        }

        let avg_word_height =
            confident.iter().map(|w| w.bbox.height).sum::<f32>() / confident.len() as f32;

        confident.sort_by(|a, b| {
            safe_float_cmp(a.bbox.top(), b.bbox.top())
                .then_with(|| safe_float_cmp(a.bbox.left(), b.bbox.left()))
        });

        let lines = self.group_lines(&confident, avg_word_height);
        let blocks = self.group_blocks(&lines, avg_word_height);

        debug!(
            "segmenter: {} words -> {} lines -> {} blocks (avg height {:.1})",
            confident.len(),
            lines.len(),
            blocks.len(),
            avg_word_height
        );

        Ok(Segmentation {
            lines,
            blocks,
            avg_word_height,
        })
    }

    /// Merge words into lines while the vertical offset from the line's
    /// anchor word stays under `avg_word_height * line_tolerance_factor`.
    fn group_lines(&self, sorted: &[&Word], avg_word_height: f32) -> Vec<Line> {
        let tolerance = avg_word_height * self.config.line_tolerance_factor;
        let mut lines = Vec::new();
        let mut current: Vec<Word> = Vec::new();
        let mut anchor_top = 0.0f32;

        for word in sorted {
            if current.is_empty() {
                anchor_top = word.bbox.top();
                current.push((*word).clone());
            } else if (word.bbox.top() - anchor_top).abs() < tolerance {
                current.push((*word).clone());
            } else {
                if let Some(line) = Line::from_words(std::mem::take(&mut current)) {
                    lines.push(line);
                }
                anchor_top = word.bbox.top();
                current.push((*word).clone());
            }
        }
        if let Some(line) = Line::from_words(current) {
            lines.push(line);
        }

        trace!("segmenter: grouped {} lines", lines.len());
        lines
    }

    /// Merge consecutive lines into blocks while the gap between the
    /// previous line's bottom and the next line's top stays under
    /// `avg_word_height * block_gap_factor`.
    fn group_blocks(&self, lines: &[Line], avg_word_height: f32) -> Vec<Block> {
        let max_gap = avg_word_height * self.config.block_gap_factor;
        let mut blocks = Vec::new();
        let mut current: Vec<Line> = Vec::new();

        for line in lines {
            let start_new = match current.last() {
                None => false,
                Some(prev) => line.bbox.top() - prev.bbox.bottom() >= max_gap,
            };
            if start_new {
                if let Some(block) = Block::from_lines(std::mem::take(&mut current)) {
                    blocks.push(block);
                }
            }
            current.push(line.clone());
        }
        if let Some(block) = Block::from_lines(current) {
            blocks.push(block);
        }

        blocks
    }
}

/// Reject words with NaN or negative coordinates or dimensions.
fn validate_geometry(words: &[Word]) -> Result<()> {
    for (index, word) in words.iter().enumerate() {
        if !word.bbox.is_well_formed() {
            let reason = if !word.bbox.x.is_finite()
                || !word.bbox.y.is_finite()
                || !word.bbox.width.is_finite()
                || !word.bbox.height.is_finite()
            {
                "non-finite coordinates".to_string()
            } else if word.bbox.width < 0.0 || word.bbox.height < 0.0 {
                "negative width or height".to_string()
            } else {
                "negative position".to_string()
            };
            return Err(Error::InvalidWordGeometry { index, reason });
        }
    }
    Ok(())
}
