//! Core types shared by transaction records
//!
//! Code lists are plain slices so new members can be added without touching
//! the rules that reference them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Permitted service level codes
pub const SERVICE_LEVELS: &[&str] = &["SEPA", "URGP"];

/// Permitted local instrument codes
pub const LOCAL_INSTRUMENTS: &[&str] = &["INST"];

/// Service level code for SEPA processing
pub const SERVICE_LEVEL_SEPA: &str = "SEPA";

/// Local instrument code for instant credit transfers
pub const LOCAL_INSTRUMENT_INST: &str = "INST";

/// Euro currency code
pub const CURRENCY_EUR: &str = "EUR";

/// Swiss franc currency code
pub const CURRENCY_CHF: &str = "CHF";

/// Reference used when the caller supplies none
pub const REFERENCE_NOT_PROVIDED: &str = "NOTPROVIDED";

/// Requested date meaning "execute as soon as possible"
pub const ASAP_REQUESTED_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1999, 1, 1) {
    Some(date) => date,
    None => panic!("invalid sentinel date"),
};

/// Record attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Counterparty name
    Name,
    /// Account identifier
    Iban,
    /// Bank identifier
    Bic,
    /// Transfer amount
    Amount,
    /// ISO 4217 currency code
    Currency,
    /// Instruction identification
    Instruction,
    /// End-to-end reference
    Reference,
    /// Unstructured remittance information
    RemittanceInformation,
    /// Requested execution date
    RequestedDate,
    /// Batch booking flag
    BatchBooking,
    /// Service level code
    ServiceLevel,
    /// Creditor postal address
    CreditorAddress,
    /// Category purpose code
    CategoryPurpose,
    /// Local instrument code
    LocalInstrument,
}

impl Field {
    /// Attributes every transaction record accepts
    pub const BASE: &'static [Field] = &[
        Field::Name,
        Field::Iban,
        Field::Bic,
        Field::Amount,
        Field::Currency,
        Field::Instruction,
        Field::Reference,
        Field::RemittanceInformation,
        Field::RequestedDate,
        Field::BatchBooking,
    ];

    /// Attributes only credit transfer records accept
    pub const CREDIT_TRANSFER: &'static [Field] = &[
        Field::ServiceLevel,
        Field::CreditorAddress,
        Field::CategoryPurpose,
        Field::LocalInstrument,
    ];

    /// Attribute name as used in raw input
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Iban => "iban",
            Field::Bic => "bic",
            Field::Amount => "amount",
            Field::Currency => "currency",
            Field::Instruction => "instruction",
            Field::Reference => "reference",
            Field::RemittanceInformation => "remittance_information",
            Field::RequestedDate => "requested_date",
            Field::BatchBooking => "batch_booking",
            Field::ServiceLevel => "service_level",
            Field::CreditorAddress => "creditor_address",
            Field::CategoryPurpose => "category_purpose",
            Field::LocalInstrument => "local_instrument",
        }
    }

    /// Whether the attribute belongs to the base transaction record
    pub fn is_base(&self) -> bool {
        Self::BASE.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::BASE
            .iter()
            .chain(Self::CREDIT_TRANSFER)
            .find(|field| field.as_str() == s)
            .copied()
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// Transfer amount as supplied
///
/// A numeric input too large or too precise for [`Decimal`] is kept as its
/// textual form so validation can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    /// Amount rounded to two decimal places
    Exact(Decimal),
    /// Numeric input outside the representable range
    Unrepresentable(String),
}

impl Amount {
    /// Exact value, if representable
    pub fn exact(&self) -> Option<Decimal> {
        match self {
            Amount::Exact(value) => Some(*value),
            Amount::Unrepresentable(_) => None,
        }
    }
}

/// Postal address of a party
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    /// ISO 3166 country code
    #[serde(default)]
    pub country_code: Option<String>,

    /// First unstructured address line
    #[serde(default)]
    pub address_line1: Option<String>,

    /// Second unstructured address line
    #[serde(default)]
    pub address_line2: Option<String>,

    /// Street name
    #[serde(default)]
    pub street_name: Option<String>,

    /// Building number
    #[serde(default)]
    pub building_number: Option<String>,

    /// Post code
    #[serde(default)]
    pub post_code: Option<String>,

    /// Town name
    #[serde(default)]
    pub town_name: Option<String>,
}

impl Address {
    /// Address given as a single free-text line
    pub fn free_text(line: impl Into<String>) -> Self {
        Self {
            address_line1: Some(line.into()),
            ..Default::default()
        }
    }

    /// True when street, post code or town is given
    pub fn is_structured(&self) -> bool {
        self.street_name.is_some() || self.post_code.is_some() || self.town_name.is_some()
    }
}
