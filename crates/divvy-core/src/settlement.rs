//! # Settlement Planner
//!
//! Reduces net balances to a short list of directed transfers that zero
//! everyone out.
//!
//! ## Greedy Largest-First Matching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  debtors   (balance < 0)  max-heap by |balance|                         │
//! │  creditors (balance > 0)  max-heap by balance                           │
//! │  zero balances            ignored                                       │
//! │                                                                         │
//! │  while both heaps non-empty:                                            │
//! │      d = pop largest debtor, c = pop largest creditor                   │
//! │      t = min(|d|, c)                                                    │
//! │      emit d ──(t)──► c                                                  │
//! │      push back whichever side still has a non-zero remainder           │
//! │                                                                         │
//! │  Each round retires at least one person, so there are at most          │
//! │  (debtors + creditors − 1) transfers.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is a fast approximation. It does not always find the fewest possible
//! transfers: that requires matching subsets of debtors to subsets of
//! creditors with equal totals, which is exponential in general.
//!
//! ## Tie-break
//! Equal magnitudes pop in ascending name order, so the same balances always
//! produce the same plan. Ties only change the order and pairing of
//! transfers, never the total moved.
//!
//! ## Residual
//! Balances from drifted splits do not sum to zero. Once one side runs out
//! the loop stops and the near-zero leftover stays unmatched.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::balance::Balances;
use crate::money::Money;
use crate::types::Settlement;

/// Heap entry: a person with an outstanding magnitude (always > 0).
#[derive(Debug, PartialEq, Eq)]
struct Outstanding {
    magnitude: Money,
    name: String,
}

impl Ord for Outstanding {
    fn cmp(&self, other: &Self) -> Ordering {
        // Larger magnitude first; on ties the smaller name wins.
        self.magnitude
            .cmp(&other.magnitude)
            .then_with(|| other.name.cmp(&self.name))
    }
}

impl PartialOrd for Outstanding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plans the transfers that settle `balances`.
///
/// ## Guarantees
/// - every settlement has `amount > 0`
/// - `from` and `to` always differ
/// - applying the plan leaves every balance at zero, up to rounding drift
///
/// ## Example
/// ```rust
/// use divvy_core::balance::Balances;
/// use divvy_core::settlement::compute_settlements;
/// use divvy_core::Money;
/// use rust_decimal::Decimal;
///
/// let balances = Balances::from([
///     ("Alice".to_string(), Money::new(Decimal::new(6000, 2))),
///     ("Bob".to_string(), Money::new(Decimal::new(-6000, 2))),
/// ]);
///
/// let plan = compute_settlements(&balances);
/// assert_eq!(plan.len(), 1);
/// assert_eq!((plan[0].from.as_str(), plan[0].to.as_str()), ("Bob", "Alice"));
/// ```
pub fn compute_settlements(balances: &Balances) -> Vec<Settlement> {
    let mut debtors = BinaryHeap::new();
    let mut creditors = BinaryHeap::new();

    for (name, balance) in balances {
        let entry = Outstanding {
            magnitude: balance.abs(),
            name: name.clone(),
        };
        if balance.is_negative() {
            debtors.push(entry);
        } else if balance.is_positive() {
            creditors.push(entry);
        }
    }

    let mut settlements = Vec::with_capacity(debtors.len().max(creditors.len()));

    loop {
        let (Some(mut debtor), Some(mut creditor)) = (debtors.pop(), creditors.pop()) else {
            break;
        };

        let transfer = debtor.magnitude.min(creditor.magnitude);
        settlements.push(Settlement {
            from: debtor.name.clone(),
            to: creditor.name.clone(),
            amount: transfer,
        });

        debtor.magnitude -= transfer;
        creditor.magnitude -= transfer;

        if debtor.magnitude.is_positive() {
            debtors.push(debtor);
        }
        if creditor.magnitude.is_positive() {
            creditors.push(creditor);
        }
    }

    settlements
}

/// Applies a plan to a set of balances: each `from` gains and each `to`
/// loses the settled amount.
pub fn apply_settlements(balances: &Balances, settlements: &[Settlement]) -> Balances {
    let mut result = balances.clone();
    for s in settlements {
        *result.entry(s.from.clone()).or_default() += s.amount;
        *result.entry(s.to.clone()).or_default() -= s.amount;
    }
    result
}

// =============================================================================
// Unit Tests
// =============================================================================
