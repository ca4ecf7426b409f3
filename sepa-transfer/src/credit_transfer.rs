//! Credit transfer record
//!
//! Embeds the base [`Transaction`] and adds service level, local instrument,
//! category purpose and creditor address. The service level defaults to SEPA
//! for euro transfers when the caller did not supply one.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::attributes::{self, Attributes};
use crate::cross_field::CrossFieldRule;
use crate::rules::{FieldRule, RuleSet};
use crate::schema::SchemaVariant;
use crate::transaction::{Supplied, Transaction};
use crate::types::{
    Address, Field, CURRENCY_EUR, LOCAL_INSTRUMENTS, LOCAL_INSTRUMENT_INST, SERVICE_LEVELS,
    SERVICE_LEVEL_SEPA,
};
use crate::validation::{ValidationContext, ValidationReport};
use crate::{Error, Result};

/// Customer credit transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditTransferTransaction {
    #[serde(flatten)]
    base: Transaction,
    service_level: Option<String>,
    creditor_address: Option<Address>,
    category_purpose: Option<String>,
    local_instrument: Option<String>,
}

impl CreditTransferTransaction {
    /// Build from raw attributes.
    ///
    /// # Errors
    /// [`Error::UnknownField`] for an attribute name this record type does
    /// not have, [`Error::InvalidAttributeType`] for a value of the wrong type.
    ///
    /// # Examples
    /// ```
    /// use sepa_transfer::CreditTransferTransaction;
    ///
    /// let tx = CreditTransferTransaction::from_json(r#"{"currency": "EUR"}"#)?;
    /// assert_eq!(tx.service_level(), Some("SEPA"));
    /// # Ok::<(), sepa_transfer::Error>(())
    /// ```
    pub fn from_attributes(attrs: &Attributes) -> Result<Self> {
        let mut transaction = Self {
            base: Transaction::blank(),
            service_level: None,
            creditor_address: None,
            category_purpose: None,
            local_instrument: None,
        };
        let mut supplied = Supplied::new();

        for (name, value) in attrs {
            let field = name.parse::<Field>()?;
            if field.is_base() {
                transaction.base.assign(field, value)?;
            } else {
                transaction.assign(field, value)?;
            }
            supplied.insert(field);
        }

        transaction.base.apply_defaults(&supplied);
        transaction.apply_defaults(&supplied);
        Ok(transaction)
    }

    /// Build from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        let attrs: Attributes = serde_json::from_str(json)?;
        Self::from_attributes(&attrs)
    }

    fn assign(&mut self, field: Field, value: &Value) -> Result<()> {
        match field {
            Field::ServiceLevel => self.service_level = attributes::code(field, value)?,
            Field::CreditorAddress => self.creditor_address = attributes::address(field, value)?,
            Field::CategoryPurpose => self.category_purpose = attributes::code(field, value)?,
            Field::LocalInstrument => self.local_instrument = attributes::code(field, value)?,
            _ => return Err(Error::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn apply_defaults(&mut self, supplied: &Supplied) {
        if !supplied.contains(&Field::ServiceLevel) && self.base.currency() == Some(CURRENCY_EUR) {
            self.service_level = Some(SERVICE_LEVEL_SEPA.to_string());
            tracing::debug!("service level not supplied, defaulted to {}", SERVICE_LEVEL_SEPA);
        }
    }

    /// Attributes shared with every transaction
    pub fn base(&self) -> &Transaction {
        &self.base
    }

    /// ISO 4217 currency code
    pub fn currency(&self) -> Option<&str> {
        self.base.currency()
    }

    /// Bank identifier
    pub fn bic(&self) -> Option<&str> {
        self.base.bic()
    }

    /// Service level code
    pub fn service_level(&self) -> Option<&str> {
        self.service_level.as_deref()
    }

    /// Creditor postal address
    pub fn creditor_address(&self) -> Option<&Address> {
        self.creditor_address.as_ref()
    }

    /// Category purpose code
    pub fn category_purpose(&self) -> Option<&str> {
        self.category_purpose.as_deref()
    }

    /// Local instrument code
    pub fn local_instrument(&self) -> Option<&str> {
        self.local_instrument.as_deref()
    }

    /// Rules specific to credit transfers, on top of [`Transaction::rules`]
    pub fn rules() -> RuleSet<CreditTransferTransaction> {
        RuleSet::new()
            .with(FieldRule::inclusion(
                Field::ServiceLevel,
                |t: &CreditTransferTransaction| t.service_level.as_deref(),
                SERVICE_LEVELS,
                true,
            ))
            .with(FieldRule::length_within(
                Field::CategoryPurpose,
                |t: &CreditTransferTransaction| t.category_purpose.as_deref(),
                1,
                4,
                true,
            ))
            .with(FieldRule::inclusion(
                Field::LocalInstrument,
                |t: &CreditTransferTransaction| t.local_instrument.as_deref(),
                LOCAL_INSTRUMENTS,
                true,
            ))
            .with(CrossFieldRule::new(
                Field::LocalInstrument,
                |t: &CreditTransferTransaction| {
                    t.local_instrument.as_deref() == Some(LOCAL_INSTRUMENT_INST)
                        && t.service_level.as_deref() != Some(SERVICE_LEVEL_SEPA)
                },
                "INST can only be used with SEPA service level",
            ))
    }

    fn rule_set() -> &'static RuleSet<CreditTransferTransaction> {
        static RULES: OnceLock<RuleSet<CreditTransferTransaction>> = OnceLock::new();
        RULES.get_or_init(Self::rules)
    }

    /// Validate against the current date
    pub fn validate(&self) -> ValidationReport {
        self.validate_with(&ValidationContext::today())
    }

    /// Validate against an explicit context
    pub fn validate_with(&self, ctx: &ValidationContext) -> ValidationReport {
        let mut report = Transaction::rule_set().evaluate(&self.base, ctx);
        report.merge(Self::rule_set().evaluate(self, ctx));
        let report = report.sorted();

        tracing::debug!(violations = report.len(), "validated credit transfer");
        report
    }

    /// True when [`validate`](Self::validate) finds nothing
    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }

    /// Whether the record can be written in `variant`
    pub fn schema_compatible(&self, variant: SchemaVariant) -> bool {
        variant.accepts(self)
    }

    /// Whether the record can be written in the variant named `variant_id`.
    ///
    /// # Errors
    /// [`Error::UnknownSchemaVariant`] when no variant has that identifier.
    pub fn is_schema_compatible(&self, variant_id: &str) -> Result<bool> {
        let variant = variant_id.parse::<SchemaVariant>()?;
        Ok(self.schema_compatible(variant))
    }

    /// Every registered variant accepting the record
    pub fn compatible_variants(&self) -> BTreeSet<SchemaVariant> {
        SchemaVariant::compatible_with(self)
    }
}
