//! Field identities, values and the ordered field map.
//!
//! Field names are a closed enum rather than free-form strings, so a
//! typo in a rule or a consumer is a compile error instead of a silently
//! missing value. Every extracted value carries the strategy that
//! produced it.

use indexmap::IndexMap;
use serde::Serialize;

/// The closed set of fields the extractor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Invoice number printed by the issuer
    InvoiceNumber,
    /// Issue date
    InvoiceDate,
    /// Payment due date
    DueDate,
    /// Invoice scenario/type line (e-Arşiv, e-Fatura, ...)
    DocumentType,
    /// Fiscal transaction identifier (UUID form)
    TransactionId,
    /// Marketplace or webshop order number
    OrderNumber,
    /// Issuing company name
    SellerName,
    /// Issuing company address
    SellerAddress,
    /// Issuer's tax office
    SellerTaxOffice,
    /// Issuer's 10-digit tax identifier
    SellerTaxId,
    /// Issuer's phone number
    SellerPhone,
    /// Issuer's e-mail address
    SellerEmail,
    /// Issuer's trade registry number
    SellerTradeRegistryNo,
    /// Issuer's 16-digit central registry number
    SellerMersisNo,
    /// Recipient name
    BuyerName,
    /// Recipient address
    BuyerAddress,
    /// Recipient's 11-digit national identity number
    BuyerNationalId,
    /// Issuer-assigned customer number of the recipient
    BuyerCustomerNo,
    /// Currency of the amounts
    Currency,
    /// Net total before tax
    Subtotal,
    /// Total discount applied
    TotalDiscount,
    /// Tax percentage
    TaxRate,
    /// Calculated tax amount
    TaxAmount,
    /// Final amount due
    GrandTotal,
    /// Payment method line
    PaymentMethod,
    /// Bank account IBAN
    BankIban,
}

impl FieldKind {
    /// Stable snake_case name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::InvoiceNumber => "invoice_number",
            FieldKind::InvoiceDate => "invoice_date",
            FieldKind::DueDate => "due_date",
            FieldKind::DocumentType => "document_type",
            FieldKind::TransactionId => "transaction_id",
            FieldKind::OrderNumber => "order_number",
            FieldKind::SellerName => "seller_name",
            FieldKind::SellerAddress => "seller_address",
            FieldKind::SellerTaxOffice => "seller_tax_office",
            FieldKind::SellerTaxId => "seller_tax_id",
            FieldKind::SellerPhone => "seller_phone",
            FieldKind::SellerEmail => "seller_email",
            FieldKind::SellerTradeRegistryNo => "seller_trade_registry_no",
            FieldKind::SellerMersisNo => "seller_mersis_no",
            FieldKind::BuyerName => "buyer_name",
            FieldKind::BuyerAddress => "buyer_address",
            FieldKind::BuyerNationalId => "buyer_national_id",
            FieldKind::BuyerCustomerNo => "buyer_customer_no",
            FieldKind::Currency => "currency",
            FieldKind::Subtotal => "subtotal",
            FieldKind::TotalDiscount => "total_discount",
            FieldKind::TaxRate => "tax_rate",
            FieldKind::TaxAmount => "tax_amount",
            FieldKind::GrandTotal => "grand_total",
            FieldKind::PaymentMethod => "payment_method",
            FieldKind::BankIban => "bank_iban",
        }
    }
}

/// How a field value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Found on the same line as a label keyword
    AnchoredSameLine,
    /// Collected from the lines below a label keyword
    MultilineBelow,
    /// Matched by a field pattern anywhere in the document
    RegexFallback,
    /// Largest monetary value on the page (grand total only)
    LargestAmountFallback,
    /// Derived arithmetically from other values
    Computed,
    /// Filled or normalized by a vendor profile rule
    ProfileRule,
}

/// An extracted field value with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    /// The normalized value; never empty after trimming
    pub value: String,
    /// The strategy that produced the value
    pub strategy: Strategy,
}

impl FieldValue {
    /// Create a field value. Returns `None` if the value is empty after
    /// trimming; a present field is always non-empty.
    pub fn new(value: impl Into<String>, strategy: Strategy) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            value: trimmed.to_string(),
            strategy,
        })
    }
}

/// Insertion-ordered map of extracted fields.
///
/// Absence of a key means "not found"; it is never an error. Iteration
/// and serialization preserve insertion order, so output is stable run
/// to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldMap {
    entries: IndexMap<FieldKind, FieldValue>,
}

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field.
    pub fn get(&self, kind: FieldKind) -> Option<&FieldValue> {
        self.entries.get(&kind)
    }

    /// True if the field is present.
    pub fn contains(&self, kind: FieldKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Insert or replace a field value.
    pub fn set(&mut self, kind: FieldKind, value: FieldValue) {
        self.entries.insert(kind, value);
    }

    /// Insert only if the field is currently absent. Returns whether the
    /// value was inserted.
    pub fn set_if_empty(&mut self, kind: FieldKind, value: FieldValue) -> bool {
        if self.entries.contains_key(&kind) {
            false
        } else {
            self.entries.insert(kind, value);
            true
        }
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no fields are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKind, &FieldValue)> {
        self.entries.iter()
    }
}
