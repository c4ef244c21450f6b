//! # Domain Types
//!
//! Core domain types used throughout Divvy.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Person      │   │     Expense     │   │      Split      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  payer          │   │  expense_id(FK) │       │
//! │  │  name (unique)  │   │  amount         │──►│  person         │       │
//! │  └─────────────────┘   │  split_policy   │   │  amount_owed    │       │
//! │                        │  splits (owned) │   │  share_value    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Derived, never stored:                                                 │
//! │  ┌─────────────────┐   ┌──────────────────────────┐                    │
//! │  │     Balance     │   │        Settlement        │                    │
//! │  │  person, net    │   │  from ──(amount)──► to   │                    │
//! │  └─────────────────┘   └──────────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A person has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `name`: business key - case-sensitive and unique
//!
//! Derived views (balances, settlements) are keyed by name.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

// =============================================================================
// Person
// =============================================================================

/// Someone who pays for or takes part in expenses.
///
/// Created on first reference by name; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Person {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Split Policy
// =============================================================================

/// The rule used to turn an expense total into per-participant amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitPolicy {
    /// Everyone owes `round(amount / n)`.
    Equal,
    /// Share values are the owed amounts, verbatim.
    Exact,
    /// Share values are percentages of the amount.
    Percentage,
}

impl SplitPolicy {
    /// All recognized policies, in wire order.
    pub const ALL: [SplitPolicy; 3] = [SplitPolicy::Equal, SplitPolicy::Exact, SplitPolicy::Percentage];

    /// Wire/storage name (`EQUAL`, `EXACT`, `PERCENTAGE`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            SplitPolicy::Equal => "EQUAL",
            SplitPolicy::Exact => "EXACT",
            SplitPolicy::Percentage => "PERCENTAGE",
        }
    }

    /// Whether the policy needs one share value per participant.
    pub const fn requires_share_values(&self) -> bool {
        !matches!(self, SplitPolicy::Equal)
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a wire name. Matching is case-sensitive.
impl FromStr for SplitPolicy {
    type Err = UnknownSplitPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SplitPolicy::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownSplitPolicy(s.to_string()))
    }
}

/// Returned when a string is not one of the recognized policy names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSplitPolicy(pub String);

impl fmt::Display for UnknownSplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown split policy '{}'", self.0)
    }
}

impl std::error::Error for UnknownSplitPolicy {}

// =============================================================================
// Expense & Split
// =============================================================================

/// A recorded expense with its splits.
///
/// The expense exclusively owns its splits: they are created, replaced and
/// deleted together with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    /// Total paid. Always > 0.
    pub amount: Money,
    pub payer: Person,
    pub created_at: DateTime<Utc>,
    pub split_policy: SplitPolicy,
    /// In participant order.
    pub splits: Vec<Split>,
}

impl Expense {
    /// Sum of all owed amounts. May differ from `amount` by rounding drift
    /// (EQUAL/PERCENTAGE) or by caller input (EXACT).
    pub fn total_owed(&self) -> Money {
        self.splits.iter().map(|s| s.amount_owed).sum()
    }
}

/// One participant's portion of an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub id: String,
    pub expense_id: String,
    pub person: Person,
    /// Always >= 0.
    pub amount_owed: Money,
    /// Mirrors the owning expense's policy.
    pub share_type: SplitPolicy,
    /// Raw input share (exact amount or percentage); `None` for EQUAL.
    pub share_value: Option<Decimal>,
}

/// Split calculator output, before storage assigns ids.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitShare {
    pub person: Person,
    pub amount_owed: Money,
    pub share_value: Option<Decimal>,
}

// =============================================================================
// Derived Views
// =============================================================================

/// A person's net position: positive is owed money, negative owes money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(rename = "name")]
    pub person: String,
    pub net_balance: Money,
}

/// A directed payment instruction: `from` pays `to` the `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    /// Always > 0.
    pub amount: Money,
}

// =============================================================================
// Requests
// =============================================================================

/// Raw add/update request as received from a client.
///
/// Every field is optional so that missing input surfaces as a
/// `ValidationError` instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub paid_by: Option<String>,
    pub participants: Option<Vec<String>>,
    /// `EQUAL`, `EXACT` or `PERCENTAGE`.
    pub split_type: Option<String>,
    /// One per participant, same order. Ignored for EQUAL.
    pub share_values: Option<Vec<Decimal>>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Money,
    pub payer_name: String,
    pub participant_names: Vec<String>,
    pub split_policy: SplitPolicy,
    /// `None` for EQUAL; otherwise exactly one value per participant.
    pub share_values: Option<Vec<Decimal>>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_policy_round_trip_names() {
        for policy in SplitPolicy::ALL {
            assert_eq!(policy.as_str().parse::<SplitPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_split_policy_is_case_sensitive() {
        assert!("equal".parse::<SplitPolicy>().is_err());
        assert!("SHARES".parse::<SplitPolicy>().is_err());
    }

    #[test]
    fn test_requires_share_values() {
        assert!(!SplitPolicy::Equal.requires_share_values());
        assert!(SplitPolicy::Exact.requires_share_values());
        assert!(SplitPolicy::Percentage.requires_share_values());
    }

    #[test]
    fn test_request_uses_camel_case_wire_names() {
        let json = r#"{
            "description": "Dinner",
            "amount": 90.00,
            "paidBy": "Alice",
            "participants": ["Alice", "Bob"],
            "splitType": "EXACT",
            "shareValues": [40, 50]
        }"#;
        let req: ExpenseRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.paid_by.as_deref(), Some("Alice"));
        assert_eq!(req.split_type.as_deref(), Some("EXACT"));
        assert_eq!(req.share_values, Some(vec![dec!(40), dec!(50)]));
    }

    #[test]
    fn test_balance_serializes_name_field() {
        let balance = Balance {
            person: "Alice".to_string(),
            net_balance: Money::new(dec!(60.00)),
        };
        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["netBalance"], "60.00");
    }
}
