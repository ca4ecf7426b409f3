//! SEPA Credit Transfer Rules
//!
//! Validates credit transfer records and classifies them against the pain.001
//! message dialects they can be written in.
//!
//! # Architecture

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
//!
//! A record goes through three steps:
//!
//! 1. **Construction**: raw attributes are assigned, then defaults fill in
//!    what the caller did not supply (currency, reference, service level)
//! 2. **Validation**: field rules and cross-field rules run independently
//!    and every violation is collected into a [`ValidationReport`]
//! 3. **Classification**: each [`SchemaVariant`] decides whether the record
//!    fits its dialect; a batch picks a variant every record accepts
//!
//! Bad data never produces an [`Error`]. Errors are reserved for API misuse
//! such as unknown attribute names or unknown variant identifiers.
//!
//! # Example
//!
//! ```
//! use sepa_transfer::{CreditTransferTransaction, SchemaVariant};
//!
//! let tx = CreditTransferTransaction::from_json(r#"{
//!     "name": "Telekomiker AG",
//!     "iban": "DE37112589611964645802",
//!     "bic": "PBNKDEFF370",
//!     "amount": 102.50,
//!     "currency": "EUR"
//! }"#)?;
//!
//! assert!(tx.validate().is_valid());
//! assert_eq!(tx.service_level(), Some("SEPA"));
//! assert!(tx.schema_compatible(SchemaVariant::Pain00100203));
//! # Ok::<(), sepa_transfer::Error>(())
//! ```

pub mod attributes;
pub mod batch;
pub mod config;
pub mod credit_transfer;
pub mod cross_field;
pub mod error;
pub mod identifiers;
pub mod rules;
pub mod schema;
pub mod transaction;
pub mod types;
pub mod validation;

// Re-exports
pub use config::Config;
pub use credit_transfer::CreditTransferTransaction;
pub use error::{Error, Result};
pub use schema::SchemaVariant;
pub use transaction::Transaction;
pub use types::*;
pub use validation::{ErrorKind, ValidationContext, ValidationReport, Violation};
