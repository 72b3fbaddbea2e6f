//! Compiled value patterns.
//!
//! One place for every regex the extractor and the profile rules use.
//! Patterns follow the formats seen on Turkish e-invoices; amounts and
//! dates are matched in document form and canonicalized afterwards by
//! the normalizer.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Issuer invoice number: 2-4 letter prefix + 8-15 digits.
    pub static ref INVOICE_NUMBER: Regex =
        Regex::new(r"\b[A-Z]{2,4}[0-9]{8,15}\b").unwrap();

    /// Fiscal transaction id in UUID form.
    pub static ref TRANSACTION_ID: Regex = Regex::new(
        r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b"
    )
    .unwrap();

    /// Turkish IBAN, optionally grouped with spaces.
    pub static ref IBAN: Regex =
        Regex::new(r"\bTR\d{2}(?:\s?\d{4}){5}\s?\d{2}\b").unwrap();

    /// Monetary amount in Turkish format: optional dot thousands, comma decimals.
    pub static ref AMOUNT: Regex =
        Regex::new(r"\d{1,3}(?:\.\d{3})*,\d{2}\b").unwrap();

    /// Date with day/month/year and dot, slash or dash separators.
    pub static ref DATE: Regex =
        Regex::new(r"\b\d{1,2}[./-]\d{1,2}[./-]\d{4}\b").unwrap();

    /// 10-digit corporate tax identifier.
    pub static ref TAX_ID: Regex = Regex::new(r"\b\d{10}\b").unwrap();

    /// 11-digit national identity number (validity checked separately).
    pub static ref NATIONAL_ID: Regex = Regex::new(r"\b\d{11}\b").unwrap();

    /// Phone number in common national layouts.
    pub static ref PHONE: Regex =
        Regex::new(r"(?:\+90|0)\s?\(?\d{3}\)?[\s-]?\d{3}[\s-]?\d{2}[\s-]?\d{2}").unwrap();

    /// E-mail address.
    pub static ref EMAIL: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();

    /// 16-digit central registry (MERSİS) number.
    pub static ref MERSIS: Regex = Regex::new(r"\b\d{16}\b").unwrap();

    /// Trade registry number.
    pub static ref TRADE_REGISTRY: Regex = Regex::new(r"\b\d{4,7}\b").unwrap();

    /// Issuer-assigned customer number.
    pub static ref CUSTOMER_NO: Regex = Regex::new(r"\b\d{5,12}\b").unwrap();

    /// Marketplace order number.
    pub static ref ORDER_NUMBER: Regex = Regex::new(r"\b\d{6,15}\b").unwrap();

    /// Tax percentage, percent sign on either side.
    pub static ref PERCENT: Regex =
        Regex::new(r"%\s*\d{1,3}|\b\d{1,3}\s*%").unwrap();

    /// Currency code.
    pub static ref CURRENCY: Regex =
        Regex::new(r"\b(?:TL|TRY|USD|EUR|GBP)\b").unwrap();
}
