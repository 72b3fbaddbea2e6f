//! Semantic block classification.
//!
//! Each block of the segmented page is scored against per-category
//! keyword lexicons and labeled with the best-scoring category. The
//! lexicons carry both Turkish and English anchors since the documents
//! are predominantly Turkish but mixed-language invoices occur.

use crate::config::AnalyzerConfig;
use crate::layout::Block;
use crate::utils::fold_lower;
use log::trace;
use serde::Serialize;

/// Semantic label of a block.
///
/// Variant order is the deterministic tie-break order: when scores tie,
/// the lowest-index label wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockLabel {
    /// Issuer identity block
    Seller,
    /// Recipient identity block
    Buyer,
    /// Totals summary block
    Totals,
    /// Bank/payment details block
    Bank,
    /// Anything that matched no lexicon
    Other,
}

/// A block together with its semantic label.
///
/// The label is an annotation kept next to the block, never stored
/// inside it; the segmenter's output stays immutable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledBlock {
    /// The semantic label
    pub label: BlockLabel,
    /// The labeled block
    pub block: Block,
}

/// Weighted keyword lexicons. Strong anchors ("vergi dairesi", "sayın",
/// "genel toplam", "iban") outweigh generic hints that also occur in
/// other regions.
const SELLER_LEXICON: &[(&str, u32)] = &[
    ("vergi dairesi", 3),
    ("tax office", 3),
    ("mersis", 2),
    ("ticaret sicil", 2),
    ("vergi no", 1),
    ("vkn", 1),
    ("a.ş", 1),
    ("ltd", 1),
    ("şti", 1),
    ("company", 1),
];

const BUYER_LEXICON: &[(&str, u32)] = &[
    ("sayın", 3),
    ("attn", 3),
    ("alıcı", 3),
    ("bill to", 3),
    ("müşteri no", 2),
    ("customer no", 2),
    ("tckn", 2),
    ("müşteri", 1),
];

const TOTALS_LEXICON: &[(&str, u32)] = &[
    ("genel toplam", 3),
    ("grand total", 3),
    ("ödenecek tutar", 3),
    ("ara toplam", 2),
    ("subtotal", 2),
    ("hesaplanan kdv", 2),
    ("toplam", 1),
    ("total", 1),
];

const BANK_LEXICON: &[(&str, u32)] = &[
    ("iban", 3),
    ("banka", 2),
    ("bank", 2),
    ("hesap no", 2),
    ("şube", 1),
    ("account", 1),
];

fn score(text: &str, lexicon: &[(&str, u32)]) -> u32 {
    lexicon
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, weight)| weight)
        .sum()
}

/// Classify a single block.
///
/// A block matching nothing is `Other`. When both the seller and buyer
/// lexicons score, the higher score wins only if it exceeds the lower by
/// the configured dominance ratio; otherwise the lowest-index label
/// wins, keeping the outcome deterministic on ambiguous blocks.
pub fn classify(block: &Block, config: &AnalyzerConfig) -> BlockLabel {
    let text = fold_lower(&block.text());

    let scores = [
        (BlockLabel::Seller, score(&text, SELLER_LEXICON)),
        (BlockLabel::Buyer, score(&text, BUYER_LEXICON)),
        (BlockLabel::Totals, score(&text, TOTALS_LEXICON)),
        (BlockLabel::Bank, score(&text, BANK_LEXICON)),
    ];

    let (mut best, mut best_score) = (BlockLabel::Other, 0u32);
    for (label, s) in scores {
        if s > best_score {
            best = label;
            best_score = s;
        }
    }
    if best_score == 0 {
        return BlockLabel::Other;
    }

    // Identity blocks often share wording; resolve seller-vs-buyer
    // contention by dominance, not by raw maximum.
    let seller = scores[0].1;
    let buyer = scores[1].1;
    if (best == BlockLabel::Seller || best == BlockLabel::Buyer) && seller > 0 && buyer > 0 {
        let (hi, lo) = if seller >= buyer {
            (seller, buyer)
        } else {
            (buyer, seller)
        };
        if (hi as f32) < (lo as f32) * config.dominance_ratio {
            best = BlockLabel::Seller;
        }
    }

    trace!("classify: scores {:?} -> {:?}", scores, best);
    best
}

/// Label every block of a page.
pub fn label_blocks(blocks: &[Block], config: &AnalyzerConfig) -> Vec<LabeledBlock> {
    blocks
        .iter()
        .map(|block| LabeledBlock {
            label: classify(block, config),
            block: block.clone(),
        })
        .collect()
}
