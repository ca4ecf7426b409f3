//! Cross-field rules
//!
//! A cross-field rule reads several attributes at once but reports a single
//! violation, attributed to the attribute that cannot hold its value given
//! the rest of the record.

use crate::rules::Rule;
use crate::types::Field;
use crate::validation::{ErrorKind, ValidationContext, Violation};

/// Rule over a combination of attributes
pub struct CrossFieldRule<R> {
    field: Field,
    violated: fn(&R) -> bool,
    message: &'static str,
}

impl<R> CrossFieldRule<R> {
    /// Rule reporting `message` on `field` whenever `violated` holds
    pub fn new(field: Field, violated: fn(&R) -> bool, message: &'static str) -> Self {
        Self {
            field,
            violated,
            message,
        }
    }
}

impl<R> Rule<R> for CrossFieldRule<R> {
    fn field(&self) -> Field {
        self.field
    }

    fn evaluate(&self, record: &R, _ctx: &ValidationContext) -> Option<Violation> {
        (self.violated)(record).then(|| {
            Violation::new(self.field, ErrorKind::IncompatibleCombination, self.message)
        })
    }
}
