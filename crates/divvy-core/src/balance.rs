//! # Balance Aggregator
//!
//! Reduces the full ledger to one signed net balance per person.
//!
//! ```text
//! for each split:    balance[split.person] -= split.amount_owed
//! for each expense:  balance[expense.payer] += expense.amount
//! ```
//!
//! Anyone touched by either pass appears in the result, even when their
//! balance ends at exactly zero. Iteration order does not matter.

use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{Balance, Expense};

/// Net balance per person name, ordered by name.
pub type Balances = BTreeMap<String, Money>;

/// Computes every person's net balance from the full list of expenses.
///
/// ## Conservation
/// Without rounding drift the balances sum to exactly zero: every unit paid
/// is owed by someone. With drift the sum equals Σ(amount − Σ owed) over all
/// expenses; see [`total_drift`].
///
/// ## Example
/// ```rust
/// use divvy_core::balance::compute_balances;
///
/// assert!(compute_balances(&[]).is_empty());
/// ```
pub fn compute_balances(expenses: &[Expense]) -> Balances {
    let mut balances = Balances::new();

    for split in expenses.iter().flat_map(|e| &e.splits) {
        *balances.entry(split.person.name.clone()).or_default() -= split.amount_owed;
    }

    for expense in expenses {
        *balances.entry(expense.payer.name.clone()).or_default() += expense.amount;
    }

    balances
}

/// Sum of all balances. Zero when no split drifted.
pub fn total_drift(balances: &Balances) -> Money {
    balances.values().sum()
}

/// Flattens balances into the list form served to clients (name order).
pub fn balances_to_vec(balances: &Balances) -> Vec<Balance> {
    balances
        .iter()
        .map(|(person, net)| Balance {
            person: person.clone(),
            net_balance: *net,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::compute_splits;
    use crate::types::{Person, Split, SplitPolicy};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn person(name: &str) -> Person {
        Person {
            id: format!("id-{name}"),
            name: name.to_string(),
        }
    }

    fn expense(
        id: &str,
        amount: Decimal,
        payer: &str,
        participants: &[&str],
        policy: SplitPolicy,
        shares: Option<&[Decimal]>,
    ) -> Expense {
        let people: Vec<Person> = participants.iter().map(|n| person(n)).collect();
        let splits = compute_splits(Money::new(amount), policy, &people, shares)
            .unwrap()
            .into_iter()
            .enumerate()
            .map(|(i, s)| Split {
                id: format!("{id}-{i}"),
                expense_id: id.to_string(),
                person: s.person,
                amount_owed: s.amount_owed,
                share_type: policy,
                share_value: s.share_value,
            })
            .collect();

        Expense {
            id: id.to_string(),
            description: "test".to_string(),
            amount: Money::new(amount),
            payer: person(payer),
            created_at: Utc::now(),
            split_policy: policy,
            splits,
        }
    }

    #[test]
    fn test_equal_dinner() {
        let ledger = [expense(
            "e1",
            dec!(90.00),
            "Alice",
            &["Alice", "Bob", "Carol"],
            SplitPolicy::Equal,
            None,
        )];
        let balances = compute_balances(&ledger);

        assert_eq!(balances["Alice"].amount(), dec!(60.00));
        assert_eq!(balances["Bob"].amount(), dec!(-30.00));
        assert_eq!(balances["Carol"].amount(), dec!(-30.00));
        assert!(total_drift(&balances).is_zero());
    }

    #[test]
    fn test_exact_split() {
        let ledger = [expense(
            "e1",
            dec!(100.00),
            "Alice",
            &["Alice", "Bob"],
            SplitPolicy::Exact,
            Some(&[dec!(40), dec!(60)]),
        )];
        let balances = compute_balances(&ledger);

        assert_eq!(balances["Alice"].amount(), dec!(60.00));
        assert_eq!(balances["Bob"].amount(), dec!(-60.00));
    }

    #[test]
    fn test_zero_balance_is_kept() {
        let ledger = [
            expense("e1", dec!(50.00), "Alice", &["Bob"], SplitPolicy::Equal, None),
            expense("e2", dec!(50.00), "Bob", &["Alice"], SplitPolicy::Equal, None),
        ];
        let balances = compute_balances(&ledger);

        assert_eq!(balances.len(), 2);
        assert!(balances["Alice"].is_zero());
        assert!(balances["Bob"].is_zero());
    }

    #[test]
    fn test_payer_not_participating() {
        let ledger = [expense("e1", dec!(30.00), "Dana", &["Bob", "Carol"], SplitPolicy::Equal, None)];
        let balances = compute_balances(&ledger);

        assert_eq!(balances["Dana"].amount(), dec!(30.00));
        assert_eq!(balances["Bob"].amount(), dec!(-15.00));
    }

    #[test]
    fn test_drift_is_visible_in_total() {
        let ledger = [expense("e1", dec!(100.00), "A", &["A", "B", "C"], SplitPolicy::Equal, None)];
        let balances = compute_balances(&ledger);

        // 3 × 33.33 owed against 100.00 paid
        assert_eq!(total_drift(&balances).amount(), dec!(0.01));
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = expense("e1", dec!(90.00), "Alice", &["Alice", "Bob", "Carol"], SplitPolicy::Equal, None);
        let b = expense(
            "e2",
            dec!(40.00),
            "Bob",
            &["Carol", "Alice"],
            SplitPolicy::Percentage,
            Some(&[dec!(75), dec!(25)]),
        );

        let forward = compute_balances(&[a.clone(), b.clone()]);
        let backward = compute_balances(&[b, a]);
        assert_eq!(forward, backward);
        assert_eq!(forward["Carol"].amount(), dec!(-60.00));
    }

    #[test]
    fn test_largest_accepted_ledger_aggregates() {
        use crate::money::{MAX_AMOUNT, MAX_PERCENTAGE};

        let ledger = [
            expense("e1", MAX_AMOUNT, "A", &["A"], SplitPolicy::Equal, None),
            expense("e2", MAX_AMOUNT, "A", &["B"], SplitPolicy::Equal, None),
            expense(
                "e3",
                MAX_AMOUNT,
                "A",
                &["B", "C"],
                SplitPolicy::Percentage,
                Some(&[MAX_PERCENTAGE, MAX_PERCENTAGE]),
            ),
        ];
        let balances = compute_balances(&ledger);

        assert_eq!(balances["A"].amount(), dec!(2000000000000));
        assert_eq!(balances["C"].amount(), dec!(-100000000000000));
        assert_eq!(total_drift(&balances).amount(), dec!(-199000000000000));
    }

    #[test]
    fn test_balances_to_vec_is_name_ordered() {
        let ledger = [expense("e1", dec!(90.00), "Zoe", &["Mia", "Abe"], SplitPolicy::Equal, None)];
        let list = balances_to_vec(&compute_balances(&ledger));

        let names: Vec<_> = list.iter().map(|b| b.person.as_str()).collect();
        assert_eq!(names, vec!["Abe", "Mia", "Zoe"]);
    }
}
