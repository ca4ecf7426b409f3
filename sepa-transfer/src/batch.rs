//! Variant selection for a batch of credit transfers
//!
//! A file is written in one dialect, so every record in it must be
//! compatible with that dialect. The common set is the intersection of the
//! per-record sets.

use std::collections::BTreeSet;

use crate::credit_transfer::CreditTransferTransaction;
use crate::schema::SchemaVariant;

/// Variants every record accepts. Empty input yields an empty set.
pub fn common_variants<'a, I>(transactions: I) -> BTreeSet<SchemaVariant>
where
    I: IntoIterator<Item = &'a CreditTransferTransaction>,
{
    let mut iter = transactions.into_iter();
    let Some(first) = iter.next() else {
        return BTreeSet::new();
    };

    let mut common = first.compatible_variants();
    for transaction in iter {
        if common.is_empty() {
            break;
        }
        common.retain(|variant| variant.accepts(transaction));
    }
    common
}

/// First variant in `preference` that every record accepts
pub fn select_variant<'a, I>(transactions: I, preference: &[SchemaVariant]) -> Option<SchemaVariant>
where
    I: IntoIterator<Item = &'a CreditTransferTransaction>,
{
    let common = common_variants(transactions);
    let selected = preference.iter().copied().find(|variant| common.contains(variant));

    match selected {
        Some(variant) => tracing::info!("Selected schema variant {}", variant),
        None => tracing::info!(
            "No schema variant accepted by every transaction (common: {:?})",
            common
        ),
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn tx(json: &str) -> CreditTransferTransaction {
        CreditTransferTransaction::from_json(json).unwrap()
    }

    #[test]
    fn test_empty_batch() {
        let empty: Vec<CreditTransferTransaction> = Vec::new();
        assert!(common_variants(&empty).is_empty());
        assert_eq!(select_variant(&empty, &Config::default().schema.preference), None);
    }

    #[test]
    fn test_intersection() {
        let batch = vec![
            tx(r#"{"bic": "SPUEDE2UXXX"}"#),
            tx(r#"{"bic": null}"#),
        ];
        assert_eq!(
            common_variants(&batch),
            BTreeSet::from([SchemaVariant::Pain00100103, SchemaVariant::Pain00100303])
        );
    }

    #[test]
    fn test_mixed_currencies_fall_back_to_generic() {
        let batch = vec![tx(r#"{"currency": "CHF"}"#), tx(r#"{"currency": "USD"}"#)];
        let preference = Config::default().schema.preference;
        assert_eq!(select_variant(&batch, &preference), Some(SchemaVariant::Pain00100103));
    }

    #[test]
    fn test_preference_order_wins() {
        let batch = vec![tx(r#"{"bic": "SPUEDE2UXXX"}"#)];
        let preference = [SchemaVariant::Pain00100203, SchemaVariant::Pain00100103];
        assert_eq!(select_variant(&batch, &preference), Some(SchemaVariant::Pain00100203));
    }

    #[test]
    fn test_no_common_variant() {
        let batch = vec![
            tx(r#"{"currency": "CHF"}"#),
            tx(r#"{"currency": "EUR", "local_instrument": "INST"}"#),
            tx(r#"{"currency": "EUR", "service_level": "URGP"}"#),
        ];
        assert!(common_variants(&batch).is_empty());
        assert_eq!(select_variant(&batch, &SchemaVariant::ALL), None);
    }
}
