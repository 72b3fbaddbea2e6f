//! Profile rule for Trendyol marketplace invoices.

use crate::fields::{FieldKind, FieldMap, FieldValue, Strategy};
use crate::profiles::ProfileRule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Trendyol prints the order number with a label the generic anchors
    // miss when OCR fuses it with the adjacent column.
    static ref ORDER_NO: Regex = Regex::new(r"(?i)sipari[şs]\s*no\s*[:\s]\s*(\d{6,15})").unwrap();
}

/// Strengthens order-number capture on Trendyol invoices.
pub struct TrendyolRule;

impl ProfileRule for TrendyolRule {
    fn name(&self) -> &'static str {
        "trendyol"
    }

    fn applies(&self, text: &str) -> bool {
        text.contains("trendyol")
    }

    fn apply(&self, fields: &mut FieldMap, raw_text: &str) {
        if fields.contains(FieldKind::OrderNumber) {
            return;
        }
        if let Some(captures) = ORDER_NO.captures(raw_text) {
            if let Some(fv) = FieldValue::new(&captures[1], Strategy::ProfileRule) {
                fields.set_if_empty(FieldKind::OrderNumber, fv);
            }
        }
    }
}
