//! # Split Calculator
//!
//! Turns an expense total into one owed amount per participant.
//!
//! ## Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EQUAL       owed[i] = round(amount / n, 2, HALF_UP)                    │
//! │  EXACT       owed[i] = share[i]                      (verbatim)         │
//! │  PERCENTAGE  owed[i] = round(amount × share[i] / 100, 2, HALF_UP)       │
//! │                                                                         │
//! │  Rounding is per participant. The remainder is NOT redistributed:      │
//! │  Σ owed may differ from amount by up to n × 0.005 (EQUAL/PERCENTAGE).  │
//! │  EXACT sums are the caller's business and are not checked here.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Participants are resolved to [`Person`] records by the caller; this module
//! never creates anyone.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Person, SplitPolicy, SplitShare};
use crate::validation::ValidationResult;

/// Computes the owed amount for each participant, in participant order.
///
/// ## Errors
/// - `Required` if `participants` is empty
/// - `ShareCountMismatch` if the policy needs share values and their count
///   differs from the participant count
///
/// ## Example
/// ```rust
/// use divvy_core::split::compute_splits;
/// use divvy_core::{Money, Person, SplitPolicy};
/// use rust_decimal::Decimal;
///
/// let people: Vec<Person> = ["Alice", "Bob", "Carol"]
///     .iter()
///     .map(|n| Person { id: n.to_lowercase(), name: n.to_string() })
///     .collect();
///
/// let shares = compute_splits(
///     Money::new(Decimal::new(9000, 2)),
///     SplitPolicy::Equal,
///     &people,
///     None,
/// ).unwrap();
///
/// assert!(shares.iter().all(|s| s.amount_owed.to_string() == "30.00"));
/// ```
pub fn compute_splits(
    amount: Money,
    policy: SplitPolicy,
    participants: &[Person],
    share_values: Option<&[Decimal]>,
) -> ValidationResult<Vec<SplitShare>> {
    if participants.is_empty() {
        return Err(ValidationError::required("participants"));
    }

    match policy {
        SplitPolicy::Equal => {
            let each = amount.split_evenly(participants.len());
            Ok(participants
                .iter()
                .map(|person| SplitShare {
                    person: person.clone(),
                    amount_owed: each,
                    share_value: None,
                })
                .collect())
        }
        SplitPolicy::Exact | SplitPolicy::Percentage => {
            let values = share_values.unwrap_or_default();
            if values.len() != participants.len() {
                return Err(ValidationError::ShareCountMismatch {
                    participants: participants.len(),
                    shares: values.len(),
                });
            }

            Ok(participants
                .iter()
                .zip(values)
                .map(|(person, &value)| {
                    let amount_owed = match policy {
                        SplitPolicy::Percentage => amount.percentage(value),
                        _ => Money::new(value),
                    };
                    SplitShare {
                        person: person.clone(),
                        amount_owed,
                        share_value: Some(value),
                    }
                })
                .collect())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::ROUNDING_DRIFT_PER_SHARE;
    use rust_decimal_macros::dec;

    fn people(names: &[&str]) -> Vec<Person> {
        names
            .iter()
            .map(|n| Person {
                id: format!("id-{n}"),
                name: n.to_string(),
            })
            .collect()
    }

    fn owed(shares: &[SplitShare]) -> Vec<Decimal> {
        shares.iter().map(|s| s.amount_owed.amount()).collect()
    }

    #[test]
    fn test_equal_split() {
        let shares = compute_splits(
            Money::new(dec!(90.00)),
            SplitPolicy::Equal,
            &people(&["Alice", "Bob", "Carol"]),
            None,
        )
        .unwrap();

        assert_eq!(owed(&shares), vec![dec!(30.00); 3]);
        assert!(shares.iter().all(|s| s.share_value.is_none()));
        let names: Vec<_> = shares.iter().map(|s| s.person.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_equal_split_drift_is_bounded_and_not_corrected() {
        for (total, n) in [(dec!(100.00), 3), (dec!(10.00), 6), (dec!(0.01), 7), (dec!(20.00), 3)] {
            let participants: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
            let refs: Vec<&str> = participants.iter().map(String::as_str).collect();
            let shares =
                compute_splits(Money::new(total), SplitPolicy::Equal, &people(&refs), None).unwrap();

            let expected = Money::new(total).split_evenly(n);
            assert!(shares.iter().all(|s| s.amount_owed == expected));

            let sum: Money = shares.iter().map(|s| s.amount_owed).sum();
            let drift = (Money::new(total) - sum).abs().amount();
            assert!(drift <= ROUNDING_DRIFT_PER_SHARE * Decimal::from(n), "{total}/{n}");
        }
    }

    #[test]
    fn test_equal_split_keeps_drift() {
        let shares = compute_splits(
            Money::new(dec!(100.00)),
            SplitPolicy::Equal,
            &people(&["A", "B", "C"]),
            None,
        )
        .unwrap();
        let sum: Money = shares.iter().map(|s| s.amount_owed).sum();
        assert_eq!(sum.amount(), dec!(99.99));
    }

    #[test]
    fn test_equal_ignores_share_values() {
        let shares = compute_splits(
            Money::new(dec!(10.00)),
            SplitPolicy::Equal,
            &people(&["A", "B"]),
            Some(&[dec!(1)]),
        )
        .unwrap();
        assert_eq!(owed(&shares), vec![dec!(5.00), dec!(5.00)]);
    }

    #[test]
    fn test_exact_split_is_verbatim() {
        let shares = compute_splits(
            Money::new(dec!(100.00)),
            SplitPolicy::Exact,
            &people(&["Alice", "Bob"]),
            Some(&[dec!(40), dec!(60.125)]),
        )
        .unwrap();

        assert_eq!(owed(&shares), vec![dec!(40), dec!(60.125)]);
        assert_eq!(shares[1].share_value, Some(dec!(60.125)));
    }

    #[test]
    fn test_exact_sum_not_checked() {
        let shares = compute_splits(
            Money::new(dec!(100.00)),
            SplitPolicy::Exact,
            &people(&["Alice", "Bob"]),
            Some(&[dec!(10), dec!(10)]),
        )
        .unwrap();
        assert_eq!(owed(&shares), vec![dec!(10), dec!(10)]);
    }

    #[test]
    fn test_percentage_split() {
        let shares = compute_splits(
            Money::new(dec!(99.99)),
            SplitPolicy::Percentage,
            &people(&["A", "B", "C"]),
            Some(&[dec!(50), dec!(25), dec!(25)]),
        )
        .unwrap();

        // 49.995 → 50.00, 24.9975 → 25.00
        assert_eq!(owed(&shares), vec![dec!(50.00), dec!(25.00), dec!(25.00)]);
        assert_eq!(shares[0].share_value, Some(dec!(50)));
    }

    #[test]
    fn test_percentages_need_not_sum_to_100() {
        let shares = compute_splits(
            Money::new(dec!(200.00)),
            SplitPolicy::Percentage,
            &people(&["A", "B"]),
            Some(&[dec!(10), dec!(10)]),
        )
        .unwrap();
        assert_eq!(owed(&shares), vec![dec!(20.00), dec!(20.00)]);
    }

    #[test]
    fn test_share_count_mismatch() {
        for policy in [SplitPolicy::Exact, SplitPolicy::Percentage] {
            let err = compute_splits(
                Money::new(dec!(10.00)),
                policy,
                &people(&["A", "B"]),
                Some(&[dec!(10)]),
            )
            .unwrap_err();
            assert_eq!(
                err,
                ValidationError::ShareCountMismatch {
                    participants: 2,
                    shares: 1
                }
            );
        }

        let err = compute_splits(Money::new(dec!(10.00)), SplitPolicy::Exact, &people(&["A"]), None)
            .unwrap_err();
        assert!(matches!(err, ValidationError::ShareCountMismatch { shares: 0, .. }));
    }

    #[test]
    fn test_empty_participants() {
        let err = compute_splits(Money::new(dec!(10.00)), SplitPolicy::Equal, &[], None).unwrap_err();
        assert_eq!(err, ValidationError::required("participants"));
    }
}
