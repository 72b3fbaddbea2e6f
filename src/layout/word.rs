//! Core layout types: OCR words and the lines and blocks derived from them.

use crate::geometry::BoundingBox;
use serde::Serialize;

/// A single recognized word from the OCR engine.
///
/// The immutable input unit of the pipeline. Coordinates are page pixels
/// with the origin at the top-left corner; `confidence` is the engine's
/// recognition confidence in the 0-100 range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    /// Recognized text content
    pub text: String,
    /// Position of the word on the page
    pub bbox: BoundingBox,
    /// OCR confidence, 0-100
    pub confidence: u8,
}

impl Word {
    /// Create a new word.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, confidence: u8) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence,
        }
    }
}

/// A horizontal run of words sharing a vertical band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Words on the line, ordered left to right
    pub words: Vec<Word>,
    /// Union of the word boxes
    pub bbox: BoundingBox,
}

impl Line {
    /// Build a line from words. Returns `None` for an empty word list.
    ///
    /// Words are sorted left to right and the bounding box is the union
    /// of all word boxes.
    pub fn from_words(mut words: Vec<Word>) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        words.sort_by(|a, b| crate::utils::safe_float_cmp(a.bbox.left(), b.bbox.left()));
        let bbox = words
            .iter()
            .skip(1)
            .fold(words[0].bbox, |acc, w| acc.union(&w.bbox));
        Some(Self { words, bbox })
    }

    /// The line's text, words joined with single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A maximal vertical run of lines with small inter-line gaps.
///
/// Built once per page by the segmenter and immutable afterwards. The
/// bounding box is the union of all line boxes, so it contains every
/// word of every line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    /// Lines in the block, ordered top to bottom
    pub lines: Vec<Line>,
    /// Union of the line boxes
    pub bbox: BoundingBox,
}

impl Block {
    /// Build a block from lines. Returns `None` for an empty line list.
    pub fn from_lines(lines: Vec<Line>) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        let bbox = lines
            .iter()
            .skip(1)
            .fold(lines[0].bbox, |acc, l| acc.union(&l.bbox));
        Some(Self { lines, bbox })
    }

    /// The block's text, lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
