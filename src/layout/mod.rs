//! Layout analysis: words, lines, blocks and the segmenter that builds them.

pub mod segmenter;
pub mod word;

pub use segmenter::{Segmentation, Segmenter};
pub use word::{Block, Line, Word};
