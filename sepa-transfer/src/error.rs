//! Error types for API misuse
//!
//! Bad transaction data is never reported through [`Error`]; it is collected
//! as [`crate::validation::Violation`]s. An `Error` means the caller used the
//! API wrongly and no change to the record's data can fix it.

use crate::types::Field;
use thiserror::Error;

/// Result type for sepa-transfer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Caller errors
#[derive(Error, Debug)]
pub enum Error {
    /// Attribute name not known to the record type
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Schema variant identifier not in the registry
    #[error("Unknown schema variant: {0}")]
    UnknownSchemaVariant(String),

    /// Raw attribute value has the wrong type
    #[error("Invalid type for {field}: expected {expected}")]
    InvalidAttributeType {
        /// Attribute the value was supplied for
        field: Field,
        /// Accepted raw value type
        expected: &'static str,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors raised while building or querying a record, as opposed
    /// to loading configuration or input
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownField(_)
                | Error::UnknownSchemaVariant(_)
                | Error::InvalidAttributeType { .. }
        )
    }
}
