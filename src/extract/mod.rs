//! Field extraction.
//!
//! Every field runs an ordered chain of strategies and stops at the
//! first success:
//!
//! 1. anchored same-line search, preferring the block labeled for the
//!    field's region, falling back to the whole page;
//! 2. multiline-below search (addresses only);
//! 3. field pattern over the whole document text;
//! 4. largest monetary value on the page (grand total only).
//!
//! Validators run on every candidate; a failing candidate is discarded
//! and the chain continues. A field no strategy can fill is simply
//! absent from the result.

pub mod anchored;
pub mod patterns;

use crate::classify::{BlockLabel, LabeledBlock};
use crate::config::AnalyzerConfig;
use crate::fields::{FieldKind, FieldMap, FieldValue, Strategy};
use crate::layout::{Line, Segmentation};
use crate::normalize::{normalize_amount, normalize_date, normalize_text};
use crate::utils::safe_float_cmp;
use crate::validate::is_valid_national_id;
use log::{debug, trace};
use regex::Regex;

/// How the value region of a line is turned into a candidate.
enum ValueKind {
    /// Rightmost match of a pattern
    Pattern(&'static Regex),
    /// Rightmost monetary amount, canonicalized
    Amount,
    /// Rightmost date, canonicalized
    Date,
    /// Rightmost percentage, reduced to `N%`
    Percent,
    /// The whole value region as cleaned text
    RestOfLine,
    /// The leading non-numeric part of the value region
    LeadingText,
}

/// Extraction recipe for one field.
struct FieldRule {
    kind: FieldKind,
    anchors: &'static [&'static str],
    preferred: Option<BlockLabel>,
    value: ValueKind,
    /// Collect lines below the anchor instead of the same line
    multiline: bool,
    /// Keywords that terminate a multiline capture
    stops: &'static [&'static str],
    /// Pattern for the whole-document fallback, if any
    raw_fallback: Option<&'static Regex>,
    /// Use the largest-amount heuristic as the last resort
    largest_amount_fallback: bool,
}

impl FieldRule {
    const fn new(kind: FieldKind, anchors: &'static [&'static str], value: ValueKind) -> Self {
        Self {
            kind,
            anchors,
            preferred: None,
            value,
            multiline: false,
            stops: &[],
            raw_fallback: None,
            largest_amount_fallback: false,
        }
    }
}

const ADDRESS_STOPS: &[&str] = &[
    "vergi dairesi",
    "vergi no",
    "vkn",
    "tckn",
    "müşteri no",
    "telefon",
    "tel:",
    "e-posta",
    "email",
    "iban",
    "fatura",
    "web",
];

fn rules() -> Vec<FieldRule> {
    use BlockLabel::*;
    use FieldKind::*;
    use ValueKind::*;

    vec![
        FieldRule {
            raw_fallback: Some(&patterns::INVOICE_NUMBER),
            ..FieldRule::new(
                InvoiceNumber,
                &["fatura no", "fatura numarası", "invoice no"],
                Pattern(&patterns::INVOICE_NUMBER),
            )
        },
        FieldRule {
            raw_fallback: Some(&patterns::DATE),
            ..FieldRule::new(
                InvoiceDate,
                &["fatura tarihi", "düzenleme tarihi", "invoice date"],
                Date,
            )
        },
        FieldRule::new(
            DueDate,
            &["son ödeme tarihi", "vade tarihi", "due date"],
            Date,
        ),
        FieldRule::new(
            DocumentType,
            &["fatura tipi", "senaryo", "invoice type"],
            RestOfLine,
        ),
        FieldRule {
            raw_fallback: Some(&patterns::TRANSACTION_ID),
            ..FieldRule::new(TransactionId, &["ettn"], Pattern(&patterns::TRANSACTION_ID))
        },
        FieldRule::new(
            OrderNumber,
            &["sipariş no", "siparis no", "order no"],
            Pattern(&patterns::ORDER_NUMBER),
        ),
        FieldRule {
            preferred: Some(Seller),
            ..FieldRule::new(SellerName, &["ünvan", "unvan", "satıcı"], RestOfLine)
        },
        FieldRule {
            preferred: Some(Seller),
            multiline: true,
            stops: ADDRESS_STOPS,
            ..FieldRule::new(SellerAddress, &["adres", "address"], RestOfLine)
        },
        FieldRule {
            preferred: Some(Seller),
            ..FieldRule::new(
                SellerTaxOffice,
                &["vergi dairesi", "v.d.", "tax office"],
                LeadingText,
            )
        },
        FieldRule {
            preferred: Some(Seller),
            raw_fallback: Some(&patterns::TAX_ID),
            ..FieldRule::new(
                SellerTaxId,
                &["vergi no", "vergi numarası", "vkn", "tax id"],
                Pattern(&patterns::TAX_ID),
            )
        },
        FieldRule {
            preferred: Some(Seller),
            raw_fallback: Some(&patterns::PHONE),
            ..FieldRule::new(
                SellerPhone,
                &["tel", "telefon", "phone"],
                Pattern(&patterns::PHONE),
            )
        },
        FieldRule {
            raw_fallback: Some(&patterns::EMAIL),
            ..FieldRule::new(
                SellerEmail,
                &["e-posta", "eposta", "e-mail", "email"],
                Pattern(&patterns::EMAIL),
            )
        },
        FieldRule::new(
            SellerTradeRegistryNo,
            &["ticaret sicil", "sicil no"],
            Pattern(&patterns::TRADE_REGISTRY),
        ),
        FieldRule {
            raw_fallback: Some(&patterns::MERSIS),
            ..FieldRule::new(SellerMersisNo, &["mersis"], Pattern(&patterns::MERSIS))
        },
        FieldRule {
            preferred: Some(Buyer),
            ..FieldRule::new(BuyerName, &["sayın", "alıcı"], RestOfLine)
        },
        FieldRule {
            preferred: Some(Buyer),
            multiline: true,
            stops: ADDRESS_STOPS,
            ..FieldRule::new(BuyerAddress, &["adres", "address"], RestOfLine)
        },
        FieldRule {
            preferred: Some(Buyer),
            raw_fallback: Some(&patterns::NATIONAL_ID),
            ..FieldRule::new(
                BuyerNationalId,
                &["tckn", "tc kimlik", "t.c. kimlik"],
                Pattern(&patterns::NATIONAL_ID),
            )
        },
        FieldRule {
            preferred: Some(Buyer),
            ..FieldRule::new(
                BuyerCustomerNo,
                &["müşteri no", "musteri no", "customer no"],
                Pattern(&patterns::CUSTOMER_NO),
            )
        },
        FieldRule {
            raw_fallback: Some(&patterns::CURRENCY),
            ..FieldRule::new(
                Currency,
                &["para birimi", "currency"],
                Pattern(&patterns::CURRENCY),
            )
        },
        FieldRule {
            preferred: Some(Totals),
            ..FieldRule::new(
                Subtotal,
                &["ara toplam", "mal hizmet toplam", "matrah", "subtotal"],
                Amount,
            )
        },
        FieldRule {
            preferred: Some(Totals),
            ..FieldRule::new(
                TotalDiscount,
                &["toplam iskonto", "iskonto", "discount"],
                Amount,
            )
        },
        FieldRule::new(TaxRate, &["kdv oranı", "kdv oran", "vat rate"], Percent),
        FieldRule {
            preferred: Some(Totals),
            ..FieldRule::new(
                TaxAmount,
                &["hesaplanan kdv", "kdv tutarı", "toplam kdv", "tax amount", "vat amount"],
                Amount,
            )
        },
        FieldRule {
            preferred: Some(Totals),
            largest_amount_fallback: true,
            ..FieldRule::new(
                GrandTotal,
                &["genel toplam", "ödenecek tutar", "toplam tutar", "grand total", "amount due"],
                Amount,
            )
        },
        FieldRule::new(
            PaymentMethod,
            &["ödeme şekli", "ödeme sekli", "payment method"],
            RestOfLine,
        ),
        FieldRule {
            preferred: Some(Bank),
            raw_fallback: Some(&patterns::IBAN),
            ..FieldRule::new(BankIban, &["iban"], Pattern(&patterns::IBAN))
        },
    ]
}

/// Per-field candidate validator. Failure silently continues the chain.
fn validate(kind: FieldKind, candidate: &str) -> bool {
    match kind {
        FieldKind::BuyerNationalId => is_valid_national_id(candidate),
        _ => true,
    }
}

/// Per-field canonicalization of an accepted candidate.
fn finalize(kind: FieldKind, candidate: &str) -> Option<String> {
    match kind {
        FieldKind::BankIban => {
            let compact: String = candidate.chars().filter(|c| !c.is_whitespace()).collect();
            if compact.is_empty() {
                None
            } else {
                Some(compact)
            }
        }
        FieldKind::Currency => {
            let code = normalize_text(candidate);
            Some(if code == "TL" { "TRY".to_string() } else { code })
        }
        _ => {
            let text = normalize_text(candidate);
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
    }
}

/// Runs the strategy chains over a segmented, labeled page.
pub struct FieldExtractor<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> FieldExtractor<'a> {
    /// Create an extractor with the given configuration.
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Extract all known fields from a page.
    pub fn extract(
        &self,
        segmentation: &Segmentation,
        labeled: &[LabeledBlock],
        raw_text: &str,
    ) -> FieldMap {
        let mut map = FieldMap::new();

        for rule in rules() {
            if let Some((value, strategy)) = self.run_chain(&rule, segmentation, labeled, raw_text)
            {
                trace!("extract: {} = {:?} via {:?}", rule.kind.name(), value, strategy);
                if let Some(fv) = FieldValue::new(value, strategy) {
                    map.set_if_empty(rule.kind, fv);
                }
            }
        }

        debug!("extract: {} fields present", map.len());
        map
    }

    fn run_chain(
        &self,
        rule: &FieldRule,
        segmentation: &Segmentation,
        labeled: &[LabeledBlock],
        raw_text: &str,
    ) -> Option<(String, Strategy)> {
        // 1/2. Anchored search, preferred block first, then the page.
        // Multiline captures stay inside their labeled block; a page-wide
        // address search could not tell seller and buyer apart.
        let preferred_lines = rule
            .preferred
            .and_then(|label| labeled.iter().find(|lb| lb.label == label))
            .map(|lb| lb.block.lines.as_slice());

        let mut scopes: Vec<&[Line]> = Vec::with_capacity(2);
        if let Some(lines) = preferred_lines {
            scopes.push(lines);
        }
        if !(rule.multiline && rule.preferred.is_some()) {
            scopes.push(segmentation.lines.as_slice());
        }

        for lines in scopes {
            if rule.multiline {
                if let Some(value) = self.multiline_below(rule, lines) {
                    return Some((value, Strategy::MultilineBelow));
                }
            } else if let Some(value) = self.anchored_same_line(rule, lines) {
                return Some((value, Strategy::AnchoredSameLine));
            }
        }

        // 3. Whole-document pattern.
        if let Some(re) = rule.raw_fallback {
            for m in re.find_iter(raw_text) {
                if validate(rule.kind, m.as_str()) {
                    if let Some(value) = self.finalize_candidate(rule, m.as_str()) {
                        return Some((value, Strategy::RegexFallback));
                    }
                }
            }
        }

        // 4. Largest amount on the page; grand total only.
        if rule.largest_amount_fallback {
            if let Some(value) = largest_amount(raw_text) {
                return Some((value, Strategy::LargestAmountFallback));
            }
        }

        None
    }

    fn anchored_same_line(&self, rule: &FieldRule, lines: &[Line]) -> Option<String> {
        for hit in anchored::anchor_hits(lines, rule.anchors) {
            let region = anchored::value_text(&lines[hit.line_index], hit.value_start);
            if region.is_empty() {
                continue;
            }
            let candidate = match &rule.value {
                ValueKind::Pattern(re) => anchored::rightmost_match(&region, re),
                ValueKind::Amount => anchored::rightmost_match(&region, &patterns::AMOUNT),
                ValueKind::Date => anchored::rightmost_match(&region, &patterns::DATE),
                ValueKind::Percent => anchored::rightmost_match(&region, &patterns::PERCENT),
                ValueKind::RestOfLine => Some(region.clone()),
                ValueKind::LeadingText => leading_text(&region),
            };
            let Some(candidate) = candidate else { continue };
            if !validate(rule.kind, &candidate) {
                continue;
            }
            if let Some(value) = self.finalize_candidate(rule, &candidate) {
                return Some(value);
            }
        }
        None
    }

    fn multiline_below(&self, rule: &FieldRule, lines: &[Line]) -> Option<String> {
        for hit in anchored::anchor_hits(lines, rule.anchors) {
            let parts = anchored::collect_below(
                lines,
                &hit,
                rule.stops,
                self.config.max_address_lines,
            );
            if parts.is_empty() {
                continue;
            }
            let joined = parts
                .iter()
                .map(|p| normalize_text(p))
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
        None
    }

    fn finalize_candidate(&self, rule: &FieldRule, candidate: &str) -> Option<String> {
        let value = match &rule.value {
            ValueKind::Amount => normalize_amount(candidate)?,
            ValueKind::Date => normalize_date(candidate)?,
            ValueKind::Percent => percent_value(candidate)?,
            _ => candidate.to_string(),
        };
        finalize(rule.kind, &value)
    }
}

/// Reduce a matched percentage to `N%` form.
fn percent_value(candidate: &str) -> Option<String> {
    let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("{}%", digits))
    }
}

/// Leading non-numeric run of the value region, for label-then-text
/// fields like the tax office that often share a line with an id.
fn leading_text(region: &str) -> Option<String> {
    let cut = region
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(region.len());
    let head = region[..cut].trim().trim_end_matches(&[':', '-', ','][..]).trim();
    if head.is_empty() {
        None
    } else {
        Some(head.to_string())
    }
}

/// The largest monetary value anywhere in the document text.
fn largest_amount(raw_text: &str) -> Option<String> {
    patterns::AMOUNT
        .find_iter(raw_text)
        .filter_map(|m| {
            let canonical = normalize_amount(m.as_str())?;
            let value: f64 = canonical.parse().ok()?;
            Some((value, canonical))
        })
        .max_by(|a, b| safe_float_cmp(a.0 as f32, b.0 as f32))
        .map(|(_, canonical)| canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::label_blocks;
    use crate::geometry::BoundingBox;
    use crate::layout::{Segmenter, Word};

    fn mock_word(text: &str, x: f32, y: f32) -> Word {
        Word::new(text, BoundingBox::new(x, y, 50.0, 10.0), 95)
    }

    fn words_for_lines(lines: &[(&str, f32)]) -> Vec<Word> {
        let mut words = Vec::new();
        for (text, y) in lines {
            for (i, token) in text.split(' ').enumerate() {
                words.push(mock_word(token, 10.0 + i as f32 * 60.0, *y));
            }
        }
        words
    }

    fn extract(lines: &[(&str, f32)]) -> FieldMap {
        let cfg = AnalyzerConfig::default();
        let words = words_for_lines(lines);
        let seg = Segmenter::new(&cfg).segment(&words).unwrap();
        let labeled = label_blocks(&seg.blocks, &cfg);
        let raw = seg.text();
        FieldExtractor::new(&cfg).extract(&seg, &labeled, &raw)
    }

    #[test]
    fn test_anchored_invoice_number() {
        let map = extract(&[("Fatura No: GIB2024000012345", 10.0)]);
        let fv = map.get(FieldKind::InvoiceNumber).unwrap();
        assert_eq!(fv.value, "GIB2024000012345");
        assert_eq!(fv.strategy, Strategy::AnchoredSameLine);
    }

    #[test]
    fn test_anchored_beats_regex_fallback() {
        // Two plausible invoice numbers; the anchored one must win even
        // though the other appears first in the document.
        let map = extract(&[
            ("Ref: ZZZ9999999999", 10.0),
            ("Fatura No: GIB2024000012345", 40.0),
        ]);
        let fv = map.get(FieldKind::InvoiceNumber).unwrap();
        assert_eq!(fv.value, "GIB2024000012345");
        assert_eq!(fv.strategy, Strategy::AnchoredSameLine);
    }

    #[test]
    fn test_regex_fallback_without_anchor() {
        let map = extract(&[("Belge GIB2024000012345 kapsaminda", 10.0)]);
        let fv = map.get(FieldKind::InvoiceNumber).unwrap();
        assert_eq!(fv.value, "GIB2024000012345");
        assert_eq!(fv.strategy, Strategy::RegexFallback);
    }

    #[test]
    fn test_rightmost_amount_wins_on_the_line() {
        let map = extract(&[("Genel Toplam 100,00 118,00", 10.0)]);
        let fv = map.get(FieldKind::GrandTotal).unwrap();
        assert_eq!(fv.value, "118.00");
        assert_eq!(fv.strategy, Strategy::AnchoredSameLine);
    }

    #[test]
    fn test_largest_amount_fallback_for_grand_total() {
        let map = extract(&[
            ("Kalem 10,00", 10.0),
            ("Kalem 250,75", 22.0),
            ("Kalem 99,90", 34.0),
        ]);
        let fv = map.get(FieldKind::GrandTotal).unwrap();
        assert_eq!(fv.value, "250.75");
        assert_eq!(fv.strategy, Strategy::LargestAmountFallback);
    }

    #[test]
    fn test_national_id_checksum_gates_extraction() {
        // The anchored candidate fails the checksum; the valid one is
        // found by the whole-document fallback.
        let map = extract(&[
            ("TCKN: 12345678901", 10.0),
            ("Kimlik 10000000146 dogrulandi", 200.0),
        ]);
        let fv = map.get(FieldKind::BuyerNationalId).unwrap();
        assert_eq!(fv.value, "10000000146");
        assert_eq!(fv.strategy, Strategy::RegexFallback);
    }

    #[test]
    fn test_invalid_national_id_everywhere_leaves_field_absent() {
        let map = extract(&[("TCKN: 12345678901", 10.0)]);
        assert!(map.get(FieldKind::BuyerNationalId).is_none());
    }

    #[test]
    fn test_multiline_address() {
        let map = extract(&[
            ("Sayın Ali Veli", 10.0),
            ("Adres: Çınar Sok. No:3", 22.0),
            ("Kadıköy İstanbul", 34.0),
            ("TCKN: 10000000146", 46.0),
        ]);
        let fv = map.get(FieldKind::BuyerAddress).unwrap();
        assert_eq!(fv.value, "Çınar Sok. No:3\nKadıköy İstanbul");
        assert_eq!(fv.strategy, Strategy::MultilineBelow);
    }

    #[test]
    fn test_iban_is_compacted() {
        let map = extract(&[("IBAN: TR12 0006 4000 0011 2345 6789 01", 10.0)]);
        let fv = map.get(FieldKind::BankIban).unwrap();
        assert_eq!(fv.value, "TR120006400000112345678901");
    }

    #[test]
    fn test_tax_office_leading_text() {
        let map = extract(&[("Vergi Dairesi: Kozyatağı 1234567890", 10.0)]);
        let fv = map.get(FieldKind::SellerTaxOffice).unwrap();
        assert_eq!(fv.value, "Kozyatağı");
        let tax_id = map.get(FieldKind::SellerTaxId).unwrap();
        assert_eq!(tax_id.value, "1234567890");
        assert_eq!(tax_id.strategy, Strategy::RegexFallback);
    }

    #[test]
    fn test_currency_tl_maps_to_try() {
        let map = extract(&[("Para Birimi: TL", 10.0)]);
        assert_eq!(map.get(FieldKind::Currency).unwrap().value, "TRY");
    }

    #[test]
    fn test_percent_tax_rate() {
        let map = extract(&[("KDV Oranı: %18", 10.0)]);
        assert_eq!(map.get(FieldKind::TaxRate).unwrap().value, "18%");
    }

    #[test]
    fn test_dates_normalized() {
        let map = extract(&[("Fatura Tarihi: 01.02.2024", 10.0)]);
        assert_eq!(map.get(FieldKind::InvoiceDate).unwrap().value, "01-02-2024");
    }

    #[test]
    fn test_empty_page_has_no_fields() {
        let map = extract(&[]);
        assert!(map.is_empty());
    }
}
