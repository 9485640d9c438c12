//! Regex field extractor.
//!
//! Per-record extraction of a small, closed vocabulary of domain fields
//! by pattern matching. The vocabulary is fixed (it exists for export
//! reproducibility, not semantic truth), so it is represented as a closed
//! enum rather than a sparse string-keyed map.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// The closed set of fields the regex extractor knows how to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BtrieveFieldName {
    ProviderCode,
    Address,
    State,
    ZipCode,
    Phone,
    ProcedureCode,
    Amount,
}

impl BtrieveFieldName {
    /// Stable name used as the export column/key.
    pub fn as_str(&self) -> &'static str {
        match self {
            BtrieveFieldName::ProviderCode => "provider_code",
            BtrieveFieldName::Address => "address",
            BtrieveFieldName::State => "state",
            BtrieveFieldName::ZipCode => "zip_code",
            BtrieveFieldName::Phone => "phone",
            BtrieveFieldName::ProcedureCode => "procedure_code",
            BtrieveFieldName::Amount => "amount",
        }
    }

    /// All field names, in the fixed order the vocabulary is declared.
    pub const ALL: [BtrieveFieldName; 7] = [
        BtrieveFieldName::ProviderCode,
        BtrieveFieldName::Address,
        BtrieveFieldName::State,
        BtrieveFieldName::ZipCode,
        BtrieveFieldName::Phone,
        BtrieveFieldName::ProcedureCode,
        BtrieveFieldName::Amount,
    ];
}

const US_STATES: &str = "AL|AK|AZ|AR|CA|CO|CT|DE|FL|GA|HI|ID|IL|IN|IA|KS|KY|LA|ME|MD|\
MA|MI|MN|MS|MO|MT|NE|NV|NH|NJ|NM|NY|NC|ND|OH|OK|OR|PA|RI|SC|SD|\
TN|TX|UT|VT|VA|WA|WV|WI|WY";

static PROVIDER_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3,4}\b").unwrap());
static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)P\.?O\.?\s*Box\s+\d+[A-Z]?").unwrap());
static STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b({})\b", US_STATES)).unwrap());
static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{5}(-\d{4})?\b").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b800\d{7,10}\b").unwrap());
static PROCEDURE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bD\d{4}\b").unwrap());
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\.\d{2}\b").unwrap());

fn regex_for(name: BtrieveFieldName) -> &'static Regex {
    match name {
        BtrieveFieldName::ProviderCode => &PROVIDER_CODE_RE,
        BtrieveFieldName::Address => &ADDRESS_RE,
        BtrieveFieldName::State => &STATE_RE,
        BtrieveFieldName::ZipCode => &ZIP_RE,
        BtrieveFieldName::Phone => &PHONE_RE,
        BtrieveFieldName::ProcedureCode => &PROCEDURE_RE,
        BtrieveFieldName::Amount => &AMOUNT_RE,
    }
}

/// Fixed-arity extracted field set, indexed by the closed
/// [`BtrieveFieldName`] enum rather than a sparse string-keyed map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedFields {
    pub provider_code: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub procedure_code: Option<String>,
    pub amount: Option<String>,
}

impl ExtractedFields {
    /// Extract all fields from `text` using the first match of each
    /// pattern (empty omitted from the map view).
    pub fn extract(text: &str) -> Self {
        Self {
            provider_code: first_match(BtrieveFieldName::ProviderCode, text),
            address: first_match(BtrieveFieldName::Address, text),
            state: first_match(BtrieveFieldName::State, text),
            zip_code: first_match(BtrieveFieldName::ZipCode, text),
            phone: first_match(BtrieveFieldName::Phone, text),
            procedure_code: first_match(BtrieveFieldName::ProcedureCode, text),
            amount: first_match(BtrieveFieldName::Amount, text),
        }
    }

    /// Look up a field by name.
    pub fn get(&self, name: BtrieveFieldName) -> Option<&str> {
        match name {
            BtrieveFieldName::ProviderCode => self.provider_code.as_deref(),
            BtrieveFieldName::Address => self.address.as_deref(),
            BtrieveFieldName::State => self.state.as_deref(),
            BtrieveFieldName::ZipCode => self.zip_code.as_deref(),
            BtrieveFieldName::Phone => self.phone.as_deref(),
            BtrieveFieldName::ProcedureCode => self.procedure_code.as_deref(),
            BtrieveFieldName::Amount => self.amount.as_deref(),
        }
    }

    /// String-keyed view for export formats that need one (CSV header
    /// union, SQLite columns). Missing fields are empty strings, not
    /// absent keys, matching the CSV/SQLite export contract.
    pub fn as_map(&self) -> Vec<(&'static str, String)> {
        BtrieveFieldName::ALL
            .iter()
            .map(|name| (name.as_str(), self.get(*name).unwrap_or("").to_string()))
            .collect()
    }
}

fn first_match(name: BtrieveFieldName, text: &str) -> Option<String> {
    regex_for(name)
        .find(text)
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
}
