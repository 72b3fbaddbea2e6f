//! Totals consistency reconciliation.
//!
//! OCR misreads digits; the subtotal/tax/grand-total triangle is the one
//! place the document lets us check its own arithmetic. The reconciler
//! fills a missing grand total, snaps a near-miss to the computed sum,
//! and flags anything worse without ever overwriting the stated value.

use crate::fields::{FieldKind, FieldMap, FieldValue, Strategy};
use crate::normalize::parse_amount;
use log::{debug, warn};
use serde::Serialize;

/// Outcome of the totals check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReconciliationStatus {
    /// Totals agree, or there was nothing to check
    Clean,
    /// The grand total was filled in or snapped to `subtotal + tax`
    AutoCorrected,
    /// The stated grand total disagrees with `subtotal + tax` by more
    /// than the tolerance; the stated value was left untouched
    Mismatch {
        /// Absolute difference between stated and computed totals
        difference: f64,
    },
}

/// Check and repair the totals arithmetic in place.
///
/// All comparison is done in integer cents so the epsilon behaves
/// exactly at its boundary.
pub fn reconcile(fields: &mut FieldMap, epsilon: f64) -> ReconciliationStatus {
    let subtotal = field_cents(fields, FieldKind::Subtotal);
    let tax = field_cents(fields, FieldKind::TaxAmount);
    let grand = field_cents(fields, FieldKind::GrandTotal);

    let (Some(subtotal), Some(tax)) = (subtotal, tax) else {
        return ReconciliationStatus::Clean;
    };
    let computed = subtotal + tax;
    let epsilon_cents = to_cents(epsilon);

    match grand {
        None => {
            debug!("reconcile: grand total missing, computed {}", computed);
            set_cents(fields, FieldKind::GrandTotal, computed);
            ReconciliationStatus::AutoCorrected
        }
        Some(stated) if stated == computed => ReconciliationStatus::Clean,
        Some(stated) if (stated - computed).abs() <= epsilon_cents => {
            debug!(
                "reconcile: snapping grand total {} -> {}",
                stated, computed
            );
            set_cents(fields, FieldKind::GrandTotal, computed);
            ReconciliationStatus::AutoCorrected
        }
        Some(stated) => {
            let difference = (stated - computed).abs() as f64 / 100.0;
            warn!(
                "reconcile: totals mismatch, stated {} vs computed {} ({} off)",
                stated, computed, difference
            );
            ReconciliationStatus::Mismatch { difference }
        }
    }
}

fn field_cents(fields: &FieldMap, kind: FieldKind) -> Option<i64> {
    fields
        .get(kind)
        .and_then(|fv| parse_amount(&fv.value))
        .map(to_cents)
}

fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

fn set_cents(fields: &mut FieldMap, kind: FieldKind, cents: i64) {
    let value = format!("{}.{:02}", cents / 100, cents % 100);
    if let Some(fv) = FieldValue::new(value, Strategy::Computed) {
        fields.set(kind, fv);
    }
}
