//! Profile rule for A101 retail invoices.

use crate::fields::{FieldKind, FieldMap, FieldValue, Strategy};
use crate::normalize::normalize_amount;
use crate::profiles::ProfileRule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A101 receipt numbers: bare "A" followed by 15 digits, no prefix
    // the generic invoice-number pattern would accept.
    static ref A101_INVOICE_NO: Regex = Regex::new(r"\bA\d{15}\b").unwrap();
    // Their grand-total label is often abbreviated or OCR-mangled.
    static ref A101_GRAND_TOTAL: Regex =
        Regex::new(r"(?i)g(?:en(?:el)?)?\.?\s*toplam[:\s]*(\d{1,3}(?:\.\d{3})*,\d{2})").unwrap();
}

/// Fallbacks for A101's receipt-style invoice layout.
pub struct A101Rule;

impl ProfileRule for A101Rule {
    fn name(&self) -> &'static str {
        "a101"
    }

    fn applies(&self, text: &str) -> bool {
        text.contains("a101")
    }

    fn apply(&self, fields: &mut FieldMap, raw_text: &str) {
        if !fields.contains(FieldKind::InvoiceNumber) {
            if let Some(m) = A101_INVOICE_NO.find(raw_text) {
                if let Some(fv) = FieldValue::new(m.as_str(), Strategy::ProfileRule) {
                    fields.set_if_empty(FieldKind::InvoiceNumber, fv);
                }
            }
        }

        if !fields.contains(FieldKind::GrandTotal) {
            if let Some(captures) = A101_GRAND_TOTAL.captures(raw_text) {
                if let Some(value) = normalize_amount(&captures[1]) {
                    if let Some(fv) = FieldValue::new(value, Strategy::ProfileRule) {
                        fields.set_if_empty(FieldKind::GrandTotal, fv);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_only_to_a101_documents() {
        assert!(A101Rule.applies("a101 yeni mağazacılık a.ş."));
        assert!(!A101Rule.applies("başka market"));
    }

    #[test]
    fn test_fills_missing_invoice_number() {
        let mut fields = FieldMap::new();
        A101Rule.apply(&mut fields, "Fiş A123456789012345 tutar");
        let fv = fields.get(FieldKind::InvoiceNumber).unwrap();
        assert_eq!(fv.value, "A123456789012345");
        assert_eq!(fv.strategy, Strategy::ProfileRule);
    }

    #[test]
    fn test_does_not_overwrite_existing_invoice_number() {
        let mut fields = FieldMap::new();
        fields.set(
            FieldKind::InvoiceNumber,
            FieldValue::new("GIB2024000012345", Strategy::AnchoredSameLine).unwrap(),
        );
        A101Rule.apply(&mut fields, "Fiş A123456789012345");
        assert_eq!(
            fields.get(FieldKind::InvoiceNumber).unwrap().value,
            "GIB2024000012345"
        );
    }

    #[test]
    fn test_abbreviated_grand_total_label() {
        let mut fields = FieldMap::new();
        A101Rule.apply(&mut fields, "G.TOPLAM 245,90");
        assert_eq!(fields.get(FieldKind::GrandTotal).unwrap().value, "245.90");
    }
}
