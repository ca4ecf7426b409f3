//! Base transaction record
//!
//! Holds the attributes every transfer carries. Construction is two-phase:
//! supplied attributes are assigned first, then defaults fill in only the
//! attributes the caller did not supply. An explicit `null` counts as
//! supplied and suppresses the default.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::attributes::{self, Attributes};
use crate::identifiers::{is_valid_bic, is_valid_iban};
use crate::rules::{FieldRule, RuleSet};
use crate::types::{Amount, Field, ASAP_REQUESTED_DATE, CURRENCY_EUR, REFERENCE_NOT_PROVIDED};
use crate::validation::{ValidationContext, ValidationReport};
use crate::{Error, Result};

/// Attributes supplied at construction
pub(crate) type Supplied = HashSet<Field>;

/// Transfer attributes common to every record type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    name: Option<String>,
    iban: Option<String>,
    bic: Option<String>,
    amount: Option<Amount>,
    currency: Option<String>,
    instruction: Option<String>,
    reference: Option<String>,
    remittance_information: Option<String>,
    requested_date: Option<NaiveDate>,
    batch_booking: bool,
}

impl Transaction {
    pub(crate) fn blank() -> Self {
        Self {
            name: None,
            iban: None,
            bic: None,
            amount: None,
            currency: None,
            instruction: None,
            reference: None,
            remittance_information: None,
            requested_date: None,
            batch_booking: true,
        }
    }

    /// Build from raw attributes.
    ///
    /// # Errors
    /// [`Error::UnknownField`] for an attribute name this record type does
    /// not have, [`Error::InvalidAttributeType`] for a value of the wrong type.
    pub fn from_attributes(attrs: &Attributes) -> Result<Self> {
        let mut transaction = Self::blank();
        let mut supplied = Supplied::new();

        for (name, value) in attrs {
            let field = name.parse::<Field>()?;
            transaction.assign(field, value)?;
            supplied.insert(field);
        }

        transaction.apply_defaults(&supplied);
        Ok(transaction)
    }

    /// Build from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        let attrs: Attributes = serde_json::from_str(json)?;
        Self::from_attributes(&attrs)
    }

    pub(crate) fn assign(&mut self, field: Field, value: &Value) -> Result<()> {
        match field {
            Field::Name => self.name = attributes::text(field, value)?,
            Field::Iban => self.iban = attributes::identifier(field, value)?,
            Field::Bic => self.bic = attributes::identifier(field, value)?,
            Field::Amount => self.amount = attributes::decimal(field, value)?,
            Field::Currency => self.currency = attributes::code(field, value)?,
            Field::Instruction => self.instruction = attributes::text(field, value)?,
            Field::Reference => self.reference = attributes::text(field, value)?,
            Field::RemittanceInformation => {
                self.remittance_information = attributes::text(field, value)?
            }
            Field::RequestedDate => self.requested_date = attributes::date(field, value)?,
            Field::BatchBooking => {
                self.batch_booking = attributes::boolean(field, value)?.unwrap_or(true)
            }
            _ => return Err(Error::UnknownField(field.to_string())),
        }
        Ok(())
    }

    pub(crate) fn apply_defaults(&mut self, supplied: &Supplied) {
        if !supplied.contains(&Field::Currency) {
            self.currency = Some(CURRENCY_EUR.to_string());
            tracing::debug!("currency not supplied, defaulted to {}", CURRENCY_EUR);
        }

        if !supplied.contains(&Field::Reference) {
            self.reference = Some(REFERENCE_NOT_PROVIDED.to_string());
        }
    }

    /// Counterparty name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Account identifier
    pub fn iban(&self) -> Option<&str> {
        self.iban.as_deref()
    }

    /// Bank identifier
    pub fn bic(&self) -> Option<&str> {
        self.bic.as_deref()
    }

    /// Transfer amount; `None` when absent or not representable
    pub fn amount(&self) -> Option<Decimal> {
        self.amount.as_ref().and_then(Amount::exact)
    }

    /// Transfer amount as supplied
    pub fn raw_amount(&self) -> Option<&Amount> {
        self.amount.as_ref()
    }

    /// ISO 4217 currency code
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Instruction identification
    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }

    /// End-to-end reference
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Unstructured remittance information
    pub fn remittance_information(&self) -> Option<&str> {
        self.remittance_information.as_deref()
    }

    /// Requested execution date as supplied
    pub fn requested_date(&self) -> Option<NaiveDate> {
        self.requested_date
    }

    /// Batch booking flag
    pub fn batch_booking(&self) -> bool {
        self.batch_booking
    }

    /// Date to execute on; the ASAP sentinel when none was requested
    pub fn execution_date(&self) -> NaiveDate {
        self.requested_date.unwrap_or(ASAP_REQUESTED_DATE)
    }

    /// Rules every transaction record is checked against
    pub fn rules() -> RuleSet<Transaction> {
        RuleSet::new()
            .with(FieldRule::length_within(Field::Name, |t: &Transaction| t.name.as_deref(), 1, 70, false))
            .with(FieldRule::format(Field::Iban, |t: &Transaction| t.iban.as_deref(), is_valid_iban, "IBAN", false))
            .with(FieldRule::format(Field::Bic, |t: &Transaction| t.bic.as_deref(), is_valid_bic, "BIC", true))
            .with(FieldRule::amount(Field::Amount, |t: &Transaction| t.amount.as_ref()))
            .with(FieldRule::length_within(Field::Currency, |t: &Transaction| t.currency.as_deref(), 3, 3, false))
            .with(FieldRule::length_within(Field::Instruction, |t: &Transaction| t.instruction.as_deref(), 1, 35, true))
            .with(FieldRule::length_within(Field::Reference, |t: &Transaction| t.reference.as_deref(), 1, 35, true))
            .with(FieldRule::length_within(
                Field::RemittanceInformation,
                |t: &Transaction| t.remittance_information.as_deref(),
                1,
                140,
                true,
            ))
            .with(FieldRule::not_past(
                Field::RequestedDate,
                |t: &Transaction| t.requested_date,
                Some(ASAP_REQUESTED_DATE),
            ))
    }

    /// Shared instance of [`rules`](Self::rules), built on first use
    pub(crate) fn rule_set() -> &'static RuleSet<Transaction> {
        static RULES: OnceLock<RuleSet<Transaction>> = OnceLock::new();
        RULES.get_or_init(Self::rules)
    }

    /// Validate against the current date
    pub fn validate(&self) -> ValidationReport {
        self.validate_with(&ValidationContext::today())
    }

    /// Validate against an explicit context
    pub fn validate_with(&self, ctx: &ValidationContext) -> ValidationReport {
        let report = Self::rule_set().evaluate(self, ctx).sorted();
        tracing::debug!(violations = report.len(), "validated transaction");
        report
    }

    /// True when [`validate`](Self::validate) finds nothing
    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }
}
