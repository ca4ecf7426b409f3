//! Configuration for transfer validation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::schema::SchemaVariant;
use crate::validation::ValidationContext;
use crate::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Schema selection settings
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// Validation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Largest accepted transfer amount
    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,

    /// Fixed reference date for the past-date rule.
    /// When unset the current local date is used at validation time.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

fn default_max_amount() -> Decimal {
    ValidationContext::DEFAULT_MAX_AMOUNT
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_amount: default_max_amount(),
            reference_date: None,
        }
    }
}

/// Schema selection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Variants to try, most preferred first, when picking one for a batch
    #[serde(default = "default_preference")]
    pub preference: Vec<SchemaVariant>,
}

fn default_preference() -> Vec<SchemaVariant> {
    vec![
        SchemaVariant::Pain00100103,
        SchemaVariant::Pain00100303,
        SchemaVariant::Pain00100203,
        SchemaVariant::Pain00100103Ch02,
    ]
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            preference: default_preference(),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(amount) = std::env::var("SEPA_TRANSFER_MAX_AMOUNT") {
            config.validation.max_amount = Decimal::from_str(amount.trim())
                .map_err(|e| Error::Config(format!("Invalid SEPA_TRANSFER_MAX_AMOUNT: {}", e)))?;
        }

        if let Ok(date) = std::env::var("SEPA_TRANSFER_REFERENCE_DATE") {
            let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
                Error::Config(format!("Invalid SEPA_TRANSFER_REFERENCE_DATE: {}", e))
            })?;
            config.validation.reference_date = Some(date);
        }

        if let Ok(preference) = std::env::var("SEPA_TRANSFER_SCHEMA_PREFERENCE") {
            config.schema.preference = preference
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(SchemaVariant::from_str)
                .collect::<Result<Vec<_>>>()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.validation.max_amount <= Decimal::ZERO {
            return Err(Error::Config(format!(
                "max_amount must be positive, got {}",
                self.validation.max_amount
            )));
        }

        if self.schema.preference.is_empty() {
            return Err(Error::Config("schema preference list is empty".to_string()));
        }

        for (idx, variant) in self.schema.preference.iter().enumerate() {
            if self.schema.preference[..idx].contains(variant) {
                return Err(Error::Config(format!(
                    "schema variant {} listed more than once",
                    variant
                )));
            }
        }

        Ok(())
    }
}
