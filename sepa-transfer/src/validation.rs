//! Validation outcomes
//!
//! Violations are collected, never raised: a record with three problems
//! produces a report with three entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Config;
use crate::types::Field;

/// Kind of data-quality violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Required attribute absent or empty
    MissingField,
    /// Present value outside the allowed set or range
    InvalidValue,
    /// Present value's length outside bounds
    InvalidLength,
    /// Date earlier than the reference date
    PastDate,
    /// Cross-field rule violated
    IncompatibleCombination,
}

impl ErrorKind {
    /// Stable code for reports
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "MISSING_FIELD",
            ErrorKind::InvalidValue => "INVALID_VALUE",
            ErrorKind::InvalidLength => "INVALID_LENGTH",
            ErrorKind::PastDate => "PAST_DATE",
            ErrorKind::IncompatibleCombination => "INCOMPATIBLE_COMBINATION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Single violation attributed to one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Offending attribute
    pub field: Field,
    /// Violation kind
    pub kind: ErrorKind,
    /// Human readable message
    pub message: String,
}

impl Violation {
    /// Create new violation
    pub fn new(field: Field, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.field, self.kind, self.message)
    }
}

/// All violations found for a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Append every violation of another report
    pub fn merge(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    /// True when no violation was recorded
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when no violation was recorded
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations attributed to `field`
    pub fn errors_on(&self, field: Field) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.field == field).collect()
    }

    /// Whether `field` has a violation of `kind`
    pub fn has(&self, field: Field, kind: ErrorKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == kind)
    }

    /// Sort by attribute then kind, for stable presentation
    pub(crate) fn sorted(mut self) -> Self {
        self.violations.sort_by(|a, b| (a.field, a.kind).cmp(&(b.field, b.kind)));
        self
    }
}

impl IntoIterator for ValidationReport {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

/// Inputs that rules need besides the record itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Requested dates before this date are rejected
    pub reference_date: NaiveDate,

    /// Largest accepted amount
    pub max_amount: Decimal,
}

impl ValidationContext {
    /// Default upper amount bound (999,999,999.99)
    pub const DEFAULT_MAX_AMOUNT: Decimal = Decimal::from_parts(1_215_752_191, 23, 0, false, 2);

    /// Context for an explicit reference date
    pub fn on(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            max_amount: Self::DEFAULT_MAX_AMOUNT,
        }
    }

    /// Context evaluated against the current local date
    pub fn today() -> Self {
        Self::on(chrono::Local::now().date_naive())
    }

    /// Context from configuration; the date is read now when not pinned
    pub fn from_config(config: &Config) -> Self {
        let reference_date = config
            .validation
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        Self {
            reference_date,
            max_amount: config.validation.max_amount,
        }
    }
}
