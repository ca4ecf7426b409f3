//! Field validators
//!
//! A rule pairs an attribute with a selector reading that attribute from the
//! record and a check. Rules are independent: a [`RuleSet`] runs every rule
//! and collects all violations, so adding a rule never changes the control
//! flow of the evaluator.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{Amount, Field};
use crate::validation::{ErrorKind, ValidationContext, ValidationReport, Violation};

/// A validation rule over records of type `R`
pub trait Rule<R>: Send + Sync {
    /// Attribute violations are attributed to
    fn field(&self) -> Field;

    /// Check `record`, returning the violation if any
    fn evaluate(&self, record: &R, ctx: &ValidationContext) -> Option<Violation>;
}

/// Check applied to the selected attribute value
pub enum Check<R> {
    /// Value must be a member of the allowed set
    Inclusion {
        /// Attribute selector
        select: fn(&R) -> Option<&str>,
        /// Allowed values
        allowed: &'static [&'static str],
    },
    /// Character count must lie in `[min, max]`
    Length {
        /// Attribute selector
        select: fn(&R) -> Option<&str>,
        /// Lower bound, inclusive
        min: usize,
        /// Upper bound, inclusive
        max: usize,
    },
    /// Value must satisfy a format predicate
    Format {
        /// Attribute selector
        select: fn(&R) -> Option<&str>,
        /// Format predicate
        is_valid: fn(&str) -> bool,
        /// Format name used in messages
        description: &'static str,
    },
    /// Amount must be positive and no larger than the context's maximum
    Amount {
        /// Attribute selector
        select: fn(&R) -> Option<&Amount>,
    },
    /// Date must not be earlier than the context's reference date
    NotPast {
        /// Attribute selector
        select: fn(&R) -> Option<NaiveDate>,
        /// Date accepted regardless of the reference date
        exempt: Option<NaiveDate>,
    },
}

/// Declarative constraint on one attribute
pub struct FieldRule<R> {
    field: Field,
    allow_absent: bool,
    check: Check<R>,
}

impl<R> FieldRule<R> {
    /// Rule from its parts
    pub fn new(field: Field, check: Check<R>, allow_absent: bool) -> Self {
        Self {
            field,
            allow_absent,
            check,
        }
    }

    /// Present value must be one of `allowed`
    pub fn inclusion(
        field: Field,
        select: fn(&R) -> Option<&str>,
        allowed: &'static [&'static str],
        allow_absent: bool,
    ) -> Self {
        Self::new(field, Check::Inclusion { select, allowed }, allow_absent)
    }

    /// Present value must have between `min` and `max` characters
    pub fn length_within(
        field: Field,
        select: fn(&R) -> Option<&str>,
        min: usize,
        max: usize,
        allow_absent: bool,
    ) -> Self {
        Self::new(field, Check::Length { select, min, max }, allow_absent)
    }

    /// Present value must satisfy `is_valid`
    pub fn format(
        field: Field,
        select: fn(&R) -> Option<&str>,
        is_valid: fn(&str) -> bool,
        description: &'static str,
        allow_absent: bool,
    ) -> Self {
        Self::new(
            field,
            Check::Format {
                select,
                is_valid,
                description,
            },
            allow_absent,
        )
    }

    /// Required amount within `(0, max_amount]`
    pub fn amount(field: Field, select: fn(&R) -> Option<&Amount>) -> Self {
        Self::new(field, Check::Amount { select }, false)
    }

    /// Optional date on or after the reference date
    pub fn not_past(field: Field, select: fn(&R) -> Option<NaiveDate>, exempt: Option<NaiveDate>) -> Self {
        Self::new(field, Check::NotPast { select, exempt }, true)
    }

    fn violation(&self, kind: ErrorKind, message: String) -> Option<Violation> {
        Some(Violation::new(self.field, kind, message))
    }

    fn on_absent(&self) -> Option<Violation> {
        if self.allow_absent {
            None
        } else {
            self.violation(ErrorKind::MissingField, format!("{} is required", self.field))
        }
    }

    /// Blank text counts as absent for required attributes
    fn text<'a>(&self, value: Option<&'a str>) -> Option<&'a str> {
        match value {
            Some(v) if !self.allow_absent && v.trim().is_empty() => None,
            other => other,
        }
    }
}

impl<R> Rule<R> for FieldRule<R> {
    fn field(&self) -> Field {
        self.field
    }

    fn evaluate(&self, record: &R, ctx: &ValidationContext) -> Option<Violation> {
        match &self.check {
            Check::Inclusion { select, allowed } => {
                let Some(value) = self.text(select(record)) else {
                    return self.on_absent();
                };
                if allowed.contains(&value) {
                    None
                } else {
                    self.violation(
                        ErrorKind::InvalidValue,
                        format!("{:?} is not one of {}", value, allowed.join(", ")),
                    )
                }
            }
            Check::Length { select, min, max } => {
                let Some(value) = self.text(select(record)) else {
                    return self.on_absent();
                };
                let len = value.chars().count();
                if (*min..=*max).contains(&len) {
                    None
                } else if min == max {
                    self.violation(
                        ErrorKind::InvalidLength,
                        format!("must be exactly {} characters, got {}", min, len),
                    )
                } else {
                    self.violation(
                        ErrorKind::InvalidLength,
                        format!("must be {}-{} characters, got {}", min, max, len),
                    )
                }
            }
            Check::Format {
                select,
                is_valid,
                description,
            } => {
                let Some(value) = self.text(select(record)) else {
                    return self.on_absent();
                };
                if is_valid(value) {
                    None
                } else {
                    self.violation(
                        ErrorKind::InvalidValue,
                        format!("{} is not a valid {}", value, description),
                    )
                }
            }
            Check::Amount { select } => {
                let amount = match select(record) {
                    None => return self.on_absent(),
                    Some(Amount::Unrepresentable(raw)) => {
                        return self.violation(
                            ErrorKind::InvalidValue,
                            format!("{} is outside the representable range", raw),
                        )
                    }
                    Some(Amount::Exact(amount)) => *amount,
                };
                if amount <= Decimal::ZERO {
                    self.violation(
                        ErrorKind::InvalidValue,
                        "must be greater than zero".to_string(),
                    )
                } else if amount > ctx.max_amount {
                    self.violation(
                        ErrorKind::InvalidValue,
                        format!("{} exceeds limit {}", amount, ctx.max_amount),
                    )
                } else {
                    None
                }
            }
            Check::NotPast { select, exempt } => {
                let Some(date) = select(record) else {
                    return self.on_absent();
                };
                if Some(date) == *exempt || date >= ctx.reference_date {
                    None
                } else {
                    self.violation(
                        ErrorKind::PastDate,
                        format!("{} is before {}", date, ctx.reference_date),
                    )
                }
            }
        }
    }
}

/// Ordered collection of rules for one record type
pub struct RuleSet<R> {
    rules: Vec<Box<dyn Rule<R>>>,
}

impl<R> Default for RuleSet<R> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<R> std::fmt::Debug for RuleSet<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.field()))
            .finish()
    }
}

impl<R> RuleSet<R> {
    /// Empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule
    pub fn with(mut self, rule: impl Rule<R> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the set holds no rule
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `record`
    pub fn evaluate(&self, record: &R, ctx: &ValidationContext) -> ValidationReport {
        let mut report = ValidationReport::new();
        for violation in self.rules.iter().filter_map(|rule| rule.evaluate(record, ctx)) {
            report.add(violation);
        }
        report
    }
}
