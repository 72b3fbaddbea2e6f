//! Vendor profile rules.
//!
//! Large issuers deviate from the common layout in stable,
//! vendor-specific ways. Profile rules run after generic extraction, in
//! registration order, and only on documents they recognize. A rule may
//! fill a field the generic pass missed or normalize an existing value;
//! it never overwrites a validated value with a guess.

mod a101;
mod flo;
mod trendyol;

pub use a101::A101Rule;
pub use flo::FloRule;
pub use trendyol::TrendyolRule;

use crate::fields::FieldMap;
use crate::utils::fold_lower;
use log::debug;

/// A vendor-specific post-processing rule.
pub trait ProfileRule: Send + Sync {
    /// Stable rule name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this rule recognizes the document. `text` is the
    /// case-folded full document text.
    fn applies(&self, text: &str) -> bool;

    /// Fill or normalize fields. `raw_text` is the original document
    /// text, for rules that match case-sensitive patterns.
    fn apply(&self, fields: &mut FieldMap, raw_text: &str);
}

/// Ordered collection of profile rules.
pub struct ProfileRegistry {
    rules: Vec<Box<dyn ProfileRule>>,
}

impl Default for ProfileRegistry {
    /// The production rule set, in the order the rules were introduced.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(A101Rule));
        registry.register(Box::new(FloRule));
        registry.register(Box::new(TrendyolRule));
        registry
    }
}

impl ProfileRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; rules run in registration order.
    pub fn register(&mut self, rule: Box<dyn ProfileRule>) {
        self.rules.push(rule);
    }

    /// Run every applicable rule over the field map. Returns the names
    /// of the rules that ran.
    pub fn apply_all(&self, fields: &mut FieldMap, raw_text: &str) -> Vec<&'static str> {
        let folded = fold_lower(raw_text);
        let mut applied = Vec::new();
        for rule in &self.rules {
            if rule.applies(&folded) {
                debug!("profiles: applying {}", rule.name());
                rule.apply(fields, raw_text);
                applied.push(rule.name());
            }
        }
        applied
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
