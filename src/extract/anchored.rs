//! Layout-aware keyword anchoring.
//!
//! Labels and values sit on the same printed line on most invoices
//! ("Vergi No: 1234567890"), so the core search is: find the words that
//! spell a label keyword, then look at the words to the right of it.
//! Addresses break the rule and continue on the lines below the label;
//! [`collect_below`] handles those.

use crate::layout::Line;
use crate::utils::fold_lower;

/// Location of a label keyword inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorHit {
    /// Index of the line containing the keyword
    pub line_index: usize,
    /// Index of the first word after the keyword span
    pub value_start: usize,
}

/// Longest keyword span considered, in words.
const MAX_ANCHOR_SPAN: usize = 4;

/// Find every line containing one of the anchor keywords.
///
/// Matching is case-folded and spans word boundaries, so "Fatura No:"
/// matches the anchor "fatura no". For each matching line the hit
/// records where the value region starts; lines are reported in page
/// order.
pub fn anchor_hits(lines: &[Line], anchors: &[&str]) -> Vec<AnchorHit> {
    let mut hits = Vec::new();
    for (line_index, line) in lines.iter().enumerate() {
        let folded: Vec<String> = line.words.iter().map(|w| fold_lower(&w.text)).collect();
        if let Some(value_start) = find_in_words(&folded, anchors) {
            hits.push(AnchorHit {
                line_index,
                value_start,
            });
        }
    }
    hits
}

/// Find the shortest word span containing any anchor; returns the index
/// of the word after the span.
fn find_in_words(folded: &[String], anchors: &[&str]) -> Option<usize> {
    for start in 0..folded.len() {
        for end in (start + 1)..=folded.len().min(start + MAX_ANCHOR_SPAN) {
            let joined = folded[start..end].join(" ");
            if anchors.iter().any(|a| joined.contains(a)) {
                return Some(end);
            }
        }
    }
    None
}

/// The text of the value region: all words right of the anchor span.
pub fn value_text(line: &Line, value_start: usize) -> String {
    line.words
        .iter()
        .skip(value_start)
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim_start_matches(&[':', '-'][..])
        .trim()
        .to_string()
}

/// Collect the value region of the anchor line plus the lines below it,
/// stopping at the first line containing a stop keyword and after
/// `max_lines` collected lines.
pub fn collect_below(
    lines: &[Line],
    hit: &AnchorHit,
    stops: &[&str],
    max_lines: usize,
) -> Vec<String> {
    let mut parts = Vec::new();

    let head = value_text(&lines[hit.line_index], hit.value_start);
    if !head.is_empty() {
        parts.push(head);
    }

    for line in lines.iter().skip(hit.line_index + 1) {
        if parts.len() >= max_lines {
            break;
        }
        let folded = fold_lower(&line.text());
        if stops.iter().any(|s| folded.contains(s)) {
            break;
        }
        let text = line.text();
        if !text.trim().is_empty() {
            parts.push(text);
        }
    }

    parts
}

/// The rightmost regex match in a text region.
pub fn rightmost_match(text: &str, re: &regex::Regex) -> Option<String> {
    re.find_iter(text).last().map(|m| m.as_str().to_string())
}
