//! Schema variant registry
//!
//! Each variant is a pain.001 dialect with its own structural eligibility
//! rule. The predicates read the record's current attributes and nothing
//! else, so any subset may be queried in any order.
//!
//! | Variant | Accepts |
//! |---|---|
//! | `pain.001.001.03` | service level absent, or SEPA in EUR |
//! | `pain.001.002.03` | BIC present, SEPA, EUR, no local instrument |
//! | `pain.001.003.03` | EUR, no local instrument |
//! | `pain.001.001.03.ch.02` | CHF, no local instrument |

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::credit_transfer::CreditTransferTransaction;
use crate::types::{CURRENCY_CHF, CURRENCY_EUR, SERVICE_LEVEL_SEPA};
use crate::Error;

/// pain.001 message dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaVariant {
    /// Generic customer credit transfer, most permissive
    #[serde(rename = "pain.001.001.03")]
    Pain00100103,
    /// German SEPA dialect requiring a BIC
    #[serde(rename = "pain.001.002.03")]
    Pain00100203,
    /// German SEPA dialect with optional BIC
    #[serde(rename = "pain.001.003.03")]
    Pain00100303,
    /// Swiss domestic dialect
    #[serde(rename = "pain.001.001.03.ch.02")]
    Pain00100103Ch02,
}

impl SchemaVariant {
    /// Every registered variant, in registry order
    pub const ALL: [SchemaVariant; 4] = [
        SchemaVariant::Pain00100103,
        SchemaVariant::Pain00100203,
        SchemaVariant::Pain00100303,
        SchemaVariant::Pain00100103Ch02,
    ];

    /// Message identifier
    pub fn id(&self) -> &'static str {
        match self {
            SchemaVariant::Pain00100103 => "pain.001.001.03",
            SchemaVariant::Pain00100203 => "pain.001.002.03",
            SchemaVariant::Pain00100303 => "pain.001.003.03",
            SchemaVariant::Pain00100103Ch02 => "pain.001.001.03.ch.02",
        }
    }

    /// Whether `transaction` can be written in this dialect
    pub fn accepts(&self, transaction: &CreditTransferTransaction) -> bool {
        let currency = transaction.currency();
        let service_level = transaction.service_level();
        let no_local_instrument = transaction.local_instrument().is_none();

        match self {
            SchemaVariant::Pain00100103 => {
                service_level.is_none()
                    || (service_level == Some(SERVICE_LEVEL_SEPA) && currency == Some(CURRENCY_EUR))
            }
            SchemaVariant::Pain00100203 => {
                transaction.bic().is_some_and(|bic| !bic.trim().is_empty())
                    && service_level == Some(SERVICE_LEVEL_SEPA)
                    && currency == Some(CURRENCY_EUR)
                    && no_local_instrument
            }
            SchemaVariant::Pain00100303 => currency == Some(CURRENCY_EUR) && no_local_instrument,
            SchemaVariant::Pain00100103Ch02 => {
                currency == Some(CURRENCY_CHF) && no_local_instrument
            }
        }
    }

    /// Variants accepting `transaction`
    pub fn compatible_with(transaction: &CreditTransferTransaction) -> BTreeSet<SchemaVariant> {
        Self::ALL
            .iter()
            .copied()
            .filter(|variant| variant.accepts(transaction))
            .collect()
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for SchemaVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|variant| variant.id() == s)
            .copied()
            .ok_or_else(|| Error::UnknownSchemaVariant(s.to_string()))
    }
}
