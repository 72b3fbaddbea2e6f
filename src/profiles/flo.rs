//! Profile rule for FLO retail invoices.

use crate::fields::{FieldKind, FieldMap, FieldValue, Strategy};
use crate::profiles::ProfileRule;
use crate::utils::fold_lower;

/// Cleans up FLO's document-type line, which their template pads with
/// scenario codes the OCR concatenates onto the type.
pub struct FloRule;

impl ProfileRule for FloRule {
    fn name(&self) -> &'static str {
        "flo"
    }

    fn applies(&self, text: &str) -> bool {
        text.contains("flo mağazacılık") || text.contains("flo magazacilik")
    }

    fn apply(&self, fields: &mut FieldMap, _raw_text: &str) {
        let Some(current) = fields.get(FieldKind::DocumentType) else {
            return;
        };
        let folded = fold_lower(&current.value);
        let cleaned = if folded.contains("arşiv") || folded.contains("arsiv") {
            "e-Arşiv Fatura"
        } else if folded.contains("fatura") {
            "e-Fatura"
        } else {
            return;
        };
        if cleaned != current.value {
            if let Some(fv) = FieldValue::new(cleaned, Strategy::ProfileRule) {
                fields.set(FieldKind::DocumentType, fv);
            }
        }
    }
}
