//! Line-item table extraction.
//!
//! Invoice tables rarely survive OCR as tables; what remains is a header
//! band ("Açıklama  Miktar  Birim Fiyat  Tutar") and rows of words that
//! still line up vertically with it. The extractor finds the header,
//! takes the x-center of each recognized column keyword as that column's
//! anchor, and assigns the words of the following bands to their nearest
//! anchor until the totals section begins.

use crate::config::AnalyzerConfig;
use crate::geometry::BoundingBox;
use crate::layout::{Line, Word};
use crate::normalize::{normalize_amount, normalize_text, parse_amount};
use crate::utils::fold_lower;
use log::{debug, trace};
use serde::Serialize;

/// One extracted table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    /// Item description
    pub description: Option<String>,
    /// Quantity, as printed
    pub quantity: Option<String>,
    /// Unit price, canonicalized
    pub unit_price: Option<String>,
    /// Row amount, canonicalized
    pub amount: Option<String>,
    /// Tax percentage, if the table carries a tax column
    pub tax_rate: Option<String>,
    /// True when `amount` was backfilled as quantity x unit price
    pub amount_computed: bool,
}

/// The table columns the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Description,
    Quantity,
    UnitPrice,
    Amount,
    TaxRate,
}

const COLUMN_KEYWORDS: &[(Column, &[&str])] = &[
    (
        Column::Description,
        &["açıklama", "aciklama", "mal", "hizmet", "cinsi", "ürün", "description"],
    ),
    (Column::Quantity, &["miktar", "adet", "qty", "quantity"]),
    (Column::UnitPrice, &["birim fiyat", "birim", "unit price"]),
    (Column::Amount, &["tutar", "amount"]),
    (Column::TaxRate, &["kdv", "vat", "tax"]),
];

/// Keywords that mark the end of the item rows.
const STOP_KEYWORDS: &[&str] = &["genel toplam", "ara toplam", "toplam", "subtotal", "total"];

/// A recognized header column with its x anchor.
#[derive(Debug, Clone, Copy)]
struct ColumnAnchor {
    column: Column,
    x: f32,
}

/// Extracts line items from the segmented page.
pub struct TableExtractor<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> TableExtractor<'a> {
    /// Create a table extractor with the given configuration.
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Extract line items from the page lines.
    ///
    /// Returns an empty list when no header band is found; a missing
    /// table is not an error.
    pub fn extract(&self, lines: &[Line]) -> Vec<LineItem> {
        let Some((header_index, anchors)) = find_header(lines) else {
            debug!("table: no header band found");
            return Vec::new();
        };
        if anchors.len() < 2 {
            return Vec::new();
        }

        let avg_gap = average_gap(&anchors);
        let max_distance = avg_gap * self.config.column_snap_factor;

        let mut items = Vec::new();
        for line in lines.iter().skip(header_index + 1) {
            let folded = fold_lower(&line.text());
            if STOP_KEYWORDS.iter().any(|s| folded.contains(s)) {
                break;
            }
            if let Some(item) = assemble_row(line, &anchors, max_distance) {
                items.push(item);
            }
        }

        debug!("table: {} line items", items.len());
        items
    }
}

/// Find the first band with at least two recognized column keywords.
fn find_header(lines: &[Line]) -> Option<(usize, Vec<ColumnAnchor>)> {
    for (index, line) in lines.iter().enumerate() {
        let anchors = header_anchors(line);
        if anchors.len() >= 2 {
            trace!("table: header at line {} with {} columns", index, anchors.len());
            return Some((index, anchors));
        }
    }
    None
}

/// Match column keywords against a line; each match contributes the
/// x-center of its word span as the column anchor. Multi-word keywords
/// ("birim fiyat") anchor at the union of their words.
fn header_anchors(line: &Line) -> Vec<ColumnAnchor> {
    let folded: Vec<String> = line.words.iter().map(|w| fold_lower(&w.text)).collect();
    let mut anchors: Vec<ColumnAnchor> = Vec::new();
    let mut used = vec![false; line.words.len()];

    for (column, keywords) in COLUMN_KEYWORDS {
        if anchors.iter().any(|a| a.column == *column) {
            continue;
        }
        'search: for start in 0..folded.len() {
            if used[start] {
                continue;
            }
            for end in (start + 1)..=folded.len().min(start + 3) {
                let joined = folded[start..end].join(" ");
                if keywords.iter().any(|k| joined.contains(k)) {
                    let bbox = line.words[start..end]
                        .iter()
                        .skip(1)
                        .fold(line.words[start].bbox, |acc: BoundingBox, w| {
                            acc.union(&w.bbox)
                        });
                    anchors.push(ColumnAnchor {
                        column: *column,
                        x: bbox.center().x,
                    });
                    for flag in used.iter_mut().take(end).skip(start) {
                        *flag = true;
                    }
                    break 'search;
                }
            }
        }
    }

    anchors.sort_by(|a, b| crate::utils::safe_float_cmp(a.x, b.x));
    anchors
}

/// Mean distance between adjacent column anchors.
fn average_gap(anchors: &[ColumnAnchor]) -> f32 {
    let gaps: Vec<f32> = anchors.windows(2).map(|w| w[1].x - w[0].x).collect();
    gaps.iter().sum::<f32>() / gaps.len() as f32
}

/// Assign each word of a row to its nearest column anchor and build a
/// line item. Words farther than `max_distance` from every anchor are
/// dropped rather than guessed.
fn assemble_row(line: &Line, anchors: &[ColumnAnchor], max_distance: f32) -> Option<LineItem> {
    let mut cells: Vec<Vec<&Word>> = vec![Vec::new(); anchors.len()];

    for word in &line.words {
        let x = word.bbox.center().x;
        let (best, distance) = anchors
            .iter()
            .enumerate()
            .map(|(i, a)| (i, (a.x - x).abs()))
            .min_by(|a, b| crate::utils::safe_float_cmp(a.1, b.1))?;
        if distance <= max_distance {
            cells[best].push(word);
        } else {
            trace!("table: word {:?} too far from any column", word.text);
        }
    }

    let mut item = LineItem {
        description: None,
        quantity: None,
        unit_price: None,
        amount: None,
        tax_rate: None,
        amount_computed: false,
    };

    for (anchor, words) in anchors.iter().zip(&cells) {
        if words.is_empty() {
            continue;
        }
        let text = normalize_text(
            &words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        );
        if text.is_empty() {
            continue;
        }
        match anchor.column {
            Column::Description => item.description = Some(text),
            Column::Quantity => item.quantity = Some(text),
            Column::UnitPrice => item.unit_price = normalize_amount(&text).or(Some(text)),
            Column::Amount => item.amount = normalize_amount(&text).or(Some(text)),
            Column::TaxRate => item.tax_rate = Some(text),
        }
    }

    // A row without a real description or without a single numeric cell
    // is layout noise, not an item.
    let has_description = item
        .description
        .as_deref()
        .is_some_and(|d| d.chars().any(char::is_alphabetic));
    let has_numeric = [&item.quantity, &item.unit_price, &item.amount]
        .iter()
        .any(|c| c.as_deref().is_some_and(|v| parse_amount(v).is_some()));
    if !has_description || !has_numeric {
        return None;
    }

    // Backfill the amount when the table omits it but quantity and unit
    // price are numeric.
    if item.amount.is_none() {
        if let (Some(qty), Some(unit)) = (
            item.quantity.as_deref().and_then(parse_amount),
            item.unit_price.as_deref().and_then(parse_amount),
        ) {
            item.amount = Some(format!("{:.2}", qty * unit));
            item.amount_computed = true;
        }
    }

    Some(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Segmenter;

    fn word_at(text: &str, x: f32, y: f32) -> Word {
        Word::new(text, BoundingBox::new(x, y, 60.0, 10.0), 95)
    }

    fn lines_from(words: Vec<Word>) -> Vec<Line> {
        let cfg = AnalyzerConfig::default();
        Segmenter::new(&cfg).segment(&words).unwrap().lines
    }

    fn table_words() -> Vec<Word> {
        vec![
            // header band
            word_at("Açıklama", 10.0, 10.0),
            word_at("Miktar", 200.0, 10.0),
            word_at("Birim", 300.0, 10.0),
            word_at("Fiyat", 365.0, 10.0),
            word_at("Tutar", 470.0, 10.0),
            // row 1
            word_at("Kalem", 10.0, 30.0),
            word_at("2", 200.0, 30.0),
            word_at("50,00", 300.0, 30.0),
            word_at("100,00", 470.0, 30.0),
            // totals stop
            word_at("Genel", 10.0, 60.0),
            word_at("Toplam", 75.0, 60.0),
            word_at("118,00", 470.0, 60.0),
        ]
    }

    #[test]
    fn test_basic_table() {
        let cfg = AnalyzerConfig::default();
        let lines = lines_from(table_words());
        let items = TableExtractor::new(&cfg).extract(&lines);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.description.as_deref(), Some("Kalem"));
        assert_eq!(item.quantity.as_deref(), Some("2"));
        assert_eq!(item.unit_price.as_deref(), Some("50.00"));
        assert_eq!(item.amount.as_deref(), Some("100.00"));
        assert!(!item.amount_computed);
    }

    #[test]
    fn test_amount_backfill_is_tagged_computed() {
        let cfg = AnalyzerConfig::default();
        let words = vec![
            word_at("Açıklama", 10.0, 10.0),
            word_at("Miktar", 200.0, 10.0),
            word_at("Birim", 300.0, 10.0),
            word_at("Fiyat", 365.0, 10.0),
            word_at("Tutar", 470.0, 10.0),
            word_at("Hizmet", 10.0, 30.0),
            word_at("3", 200.0, 30.0),
            word_at("10,00", 300.0, 30.0),
            // no amount cell
            word_at("Toplam", 10.0, 60.0),
        ];
        let items = TableExtractor::new(&cfg).extract(&lines_from(words));

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.amount.as_deref(), Some("30.00"));
        assert!(item.amount_computed);
    }

    #[test]
    fn test_rows_stop_at_totals_band() {
        let cfg = AnalyzerConfig::default();
        let mut words = table_words();
        // a row below the totals band must not become an item
        words.push(word_at("Dipnot", 10.0, 90.0));
        words.push(word_at("1,00", 470.0, 90.0));
        let items = TableExtractor::new(&cfg).extract(&lines_from(words));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_no_header_means_no_items() {
        let cfg = AnalyzerConfig::default();
        let words = vec![
            word_at("serbest", 10.0, 10.0),
            word_at("metin", 80.0, 10.0),
        ];
        let items = TableExtractor::new(&cfg).extract(&lines_from(words));
        assert!(items.is_empty());
    }

    #[test]
    fn test_far_words_are_not_guessed_into_columns() {
        let cfg = AnalyzerConfig::default();
        let mut words = table_words();
        // a stray word far right of every anchor
        words.push(word_at("999,99", 2000.0, 30.0));
        let items = TableExtractor::new(&cfg).extract(&lines_from(words));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].amount.as_deref(), Some("100.00"));
    }

    #[test]
    fn test_rows_without_description_are_dropped() {
        let cfg = AnalyzerConfig::default();
        let words = vec![
            word_at("Açıklama", 10.0, 10.0),
            word_at("Miktar", 200.0, 10.0),
            word_at("Tutar", 470.0, 10.0),
            // numeric-only band, e.g. a page artifact
            word_at("4", 200.0, 30.0),
            word_at("1,00", 470.0, 30.0),
        ];
        let items = TableExtractor::new(&cfg).extract(&lines_from(words));
        assert!(items.is_empty());
    }
}
