//! Pattern detectors for PII categories.
//!
//! A detector tests one stringified cell against a named category. The
//! registry order is fixed; every detector is applied to every cell and a
//! failure of one never affects the others.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::address::{AddressTokenizer, looks_like_address};

/// Fixed detector registry, in evaluation order.
pub const CATEGORIES: &[&str] = &[
    "emails",
    "phone_numbers",
    "street_addresses",
    "zip_codes",
    "credit_cards",
    "ips",
    "dates",
    "ssns",
    "btc_addresses",
    "po_boxes",
    "phones_with_exts",
];

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+?1[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}$").expect("phone regex")
});

static PHONE_WITH_EXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+?1[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}\s*(?i:ext\.?|x)\s*\d{2,6}$")
        .expect("phone-with-ext regex")
});

static ZIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip regex"));

static CREDIT_CARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}[- ]?){3}\d{4}$|^\d{15,16}$").expect("credit card regex")
});

static IP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((25[0-5]|2[0-4]\d|[01]?\d?\d)\.){3}(25[0-5]|2[0-4]\d|[01]?\d?\d)$")
        .expect("ip regex")
});

static SSN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{2}-\d{4}$").expect("ssn regex"));

static BTC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[13][a-km-zA-HJ-NP-Z1-9]{26,33}$").expect("btc regex")
});

static PO_BOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^p\.? ?o\.? +box +\d+$").expect("po box regex")
});

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%m/%d/%y",
    "%d %b %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// True when the trimmed cell parses as a calendar date in any of the
/// accepted formats.
pub fn is_date(cell: &str) -> bool {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return false;
    }
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
}

/// Test one cell against one category.
///
/// Unknown categories match nothing, so a stale category name degrades to a
/// zero score instead of a failure.
pub fn cell_matches(category: &str, cell: &str, tokenizer: &dyn AddressTokenizer) -> bool {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return false;
    }
    match category {
        "emails" => EMAIL.is_match(trimmed),
        "phone_numbers" => PHONE.is_match(trimmed),
        "street_addresses" => looks_like_address(tokenizer, trimmed),
        "zip_codes" => ZIP.is_match(trimmed),
        "credit_cards" => CREDIT_CARD.is_match(trimmed),
        "ips" => IP.is_match(trimmed),
        "dates" => is_date(trimmed),
        "ssns" => SSN.is_match(trimmed),
        "btc_addresses" => BTC.is_match(trimmed),
        "po_boxes" => PO_BOX.is_match(trimmed),
        "phones_with_exts" => PHONE_WITH_EXT.is_match(trimmed),
        _ => false,
    }
}
