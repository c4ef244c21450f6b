//! # Validation Module
//!
//! Turns a raw [`ExpenseRequest`] into a typed [`ExpenseDraft`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum Json extractor)                                   │
//! │  └── Shape only: every request field is optional                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Presence: description, amount, paidBy, participants, splitType    │
//! │  ├── Ranges: 0 < amount <= MAX_AMOUNT, 0 <= share values <= cap        │
//! │  └── Shape: one share value per participant (EXACT / PERCENTAGE)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE(name) constraints                               │
//! │  └── Foreign keys (splits → expenses, people)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deliberately NOT checked: that percentages sum to 100, or that EXACT
//! share values sum to the amount.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::{Money, MAX_AMOUNT, MAX_PERCENTAGE};
use crate::types::{ExpenseDraft, ExpenseRequest, SplitPolicy};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an expense description. Returns it trimmed.
pub fn validate_description(description: Option<&str>) -> ValidationResult<String> {
    match description.map(str::trim) {
        Some(d) if !d.is_empty() => Ok(d.to_string()),
        _ => Err(ValidationError::required("description")),
    }
}

/// Validates a person name.
///
/// Names are identities and are kept verbatim: `Alice`, `alice` and
/// ` Alice` are three people. Only a blank name is rejected.
///
/// ## Example
/// ```rust
/// use divvy_core::validation::validate_person_name;
///
/// assert_eq!(validate_person_name("paidBy", Some(" Alice")).unwrap(), " Alice");
/// assert!(validate_person_name("paidBy", Some("   ")).is_err());
/// assert!(validate_person_name("paidBy", None).is_err());
/// ```
pub fn validate_person_name(field: &str, name: Option<&str>) -> ValidationResult<String> {
    match name {
        Some(n) if !n.trim().is_empty() => Ok(n.to_string()),
        _ => Err(ValidationError::required(field)),
    }
}

/// Validates an expense amount (present, > 0 and at most [`MAX_AMOUNT`]).
pub fn validate_amount(amount: Option<Decimal>) -> ValidationResult<Money> {
    let amount = amount.ok_or_else(|| ValidationError::required("amount"))?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if amount > MAX_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: "amount".to_string(),
            max: MAX_AMOUNT,
        });
    }

    Ok(Money::new(amount))
}

/// Parses a split policy name.
pub fn validate_split_policy(split_type: Option<&str>) -> ValidationResult<SplitPolicy> {
    let split_type = split_type.ok_or_else(|| ValidationError::required("splitType"))?;

    split_type
        .parse::<SplitPolicy>()
        .map_err(|_| ValidationError::NotAllowed {
            field: "splitType".to_string(),
            allowed: SplitPolicy::ALL.iter().map(|p| p.as_str().to_string()).collect(),
        })
}

/// Validates share values against the participant count.
///
/// EQUAL ignores whatever was sent and yields `None`.
pub fn validate_share_values(
    policy: SplitPolicy,
    participant_count: usize,
    share_values: Option<&[Decimal]>,
) -> ValidationResult<Option<Vec<Decimal>>> {
    if !policy.requires_share_values() {
        return Ok(None);
    }

    let values = share_values.unwrap_or_default();
    if values.len() != participant_count {
        return Err(ValidationError::ShareCountMismatch {
            participants: participant_count,
            shares: values.len(),
        });
    }

    if values.iter().any(|v| *v < Decimal::ZERO) {
        return Err(ValidationError::Negative {
            field: "shareValues".to_string(),
        });
    }

    let max = match policy {
        SplitPolicy::Percentage => MAX_PERCENTAGE,
        _ => MAX_AMOUNT,
    };
    if values.iter().any(|v| *v > max) {
        return Err(ValidationError::TooLarge {
            field: "shareValues".to_string(),
            max,
        });
    }

    Ok(Some(values.to_vec()))
}

// =============================================================================
// Request Validator
// =============================================================================

/// Validates a full add/update request.
///
/// ## Rules (checked in this order)
/// 1. description, amount, paidBy, participants present and non-empty
/// 2. 0 < amount <= [`MAX_AMOUNT`]
/// 3. splitType is `EQUAL`, `EXACT` or `PERCENTAGE`
/// 4. non-EQUAL: exactly one non-negative share value per participant,
///    capped at [`MAX_AMOUNT`] (EXACT) or [`MAX_PERCENTAGE`] (PERCENTAGE)
///
/// ## Example
/// ```rust
/// use divvy_core::{ExpenseRequest, SplitPolicy};
/// use divvy_core::validation::validate_expense_request;
/// use rust_decimal::Decimal;
///
/// let req = ExpenseRequest {
///     description: Some("Dinner".into()),
///     amount: Some(Decimal::new(9000, 2)),
///     paid_by: Some("Alice".into()),
///     participants: Some(vec!["Alice".into(), "Bob".into()]),
///     split_type: Some("EQUAL".into()),
///     share_values: None,
/// };
/// let draft = validate_expense_request(&req).unwrap();
/// assert_eq!(draft.split_policy, SplitPolicy::Equal);
/// ```
pub fn validate_expense_request(request: &ExpenseRequest) -> ValidationResult<ExpenseDraft> {
    let description = validate_description(request.description.as_deref())?;
    let amount = validate_amount(request.amount)?;
    let payer_name = validate_person_name("paidBy", request.paid_by.as_deref())?;

    let participants = match request.participants.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ValidationError::required("participants")),
    };
    let participant_names = participants
        .iter()
        .map(|name| validate_person_name("participants", Some(name.as_str())))
        .collect::<ValidationResult<Vec<_>>>()?;

    let split_policy = validate_split_policy(request.split_type.as_deref())?;
    let share_values = validate_share_values(
        split_policy,
        participant_names.len(),
        request.share_values.as_deref(),
    )?;

    Ok(ExpenseDraft {
        description,
        amount,
        payer_name,
        participant_names,
        split_policy,
        share_values,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> ExpenseRequest {
        ExpenseRequest {
            description: Some("Groceries".to_string()),
            amount: Some(dec!(100.00)),
            paid_by: Some("Alice".to_string()),
            participants: Some(vec!["Alice".to_string(), "Bob".to_string()]),
            split_type: Some("EXACT".to_string()),
            share_values: Some(vec![dec!(40), dec!(60)]),
        }
    }

    #[test]
    fn test_valid_request() {
        let draft = validate_expense_request(&request()).unwrap();
        assert_eq!(draft.description, "Groceries");
        assert_eq!(draft.amount.amount(), dec!(100.00));
        assert_eq!(draft.payer_name, "Alice");
        assert_eq!(draft.participant_names, vec!["Alice", "Bob"]);
        assert_eq!(draft.split_policy, SplitPolicy::Exact);
        assert_eq!(draft.share_values, Some(vec![dec!(40), dec!(60)]));
    }

    #[test]
    fn test_missing_fields() {
        let cases: [(fn(&mut ExpenseRequest), &str); 5] = [
            (|r| r.description = None, "description"),
            (|r| r.amount = None, "amount"),
            (|r| r.paid_by = Some("  ".to_string()), "paidBy"),
            (|r| r.participants = Some(vec![]), "participants"),
            (|r| r.split_type = None, "splitType"),
        ];

        for (mutate, field) in cases {
            let mut req = request();
            mutate(&mut req);
            assert_eq!(
                validate_expense_request(&req),
                Err(ValidationError::required(field)),
                "field {field}"
            );
        }
    }

    #[test]
    fn test_blank_participant_rejected() {
        let mut req = request();
        req.participants = Some(vec!["Alice".to_string(), "".to_string()]);
        assert_eq!(
            validate_expense_request(&req),
            Err(ValidationError::required("participants"))
        );
    }

    #[test]
    fn test_names_are_not_trimmed() {
        let mut req = request();
        req.paid_by = Some(" Alice".to_string());

        let draft = validate_expense_request(&req).unwrap();
        assert_eq!(draft.payer_name, " Alice");
        assert_eq!(draft.participant_names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_amount_upper_bound() {
        let mut req = request();
        req.split_type = Some("EQUAL".to_string());

        req.amount = Some(Decimal::MAX);
        assert_eq!(
            validate_expense_request(&req),
            Err(ValidationError::TooLarge {
                field: "amount".to_string(),
                max: MAX_AMOUNT
            })
        );

        req.amount = Some(MAX_AMOUNT + dec!(0.01));
        assert!(matches!(
            validate_expense_request(&req),
            Err(ValidationError::TooLarge { .. })
        ));

        req.amount = Some(MAX_AMOUNT);
        assert!(validate_expense_request(&req).is_ok());
    }

    #[test]
    fn test_share_value_upper_bounds() {
        let mut req = request();
        req.share_values = Some(vec![dec!(40), Decimal::MAX]);
        assert_eq!(
            validate_expense_request(&req),
            Err(ValidationError::TooLarge {
                field: "shareValues".to_string(),
                max: MAX_AMOUNT
            })
        );

        req.split_type = Some("PERCENTAGE".to_string());
        req.share_values = Some(vec![dec!(50), MAX_PERCENTAGE + dec!(1)]);
        assert_eq!(
            validate_expense_request(&req),
            Err(ValidationError::TooLarge {
                field: "shareValues".to_string(),
                max: MAX_PERCENTAGE
            })
        );

        req.share_values = Some(vec![dec!(50), MAX_PERCENTAGE]);
        assert!(validate_expense_request(&req).is_ok());
    }

    #[test]
    fn test_amount_must_be_positive() {
        let mut req = request();
        req.amount = Some(dec!(0));
        assert!(matches!(
            validate_expense_request(&req),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_unknown_split_type() {
        let mut req = request();
        req.split_type = Some("SHARES".to_string());
        assert!(matches!(
            validate_expense_request(&req),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_share_count_mismatch() {
        let mut req = request();
        req.share_values = Some(vec![dec!(100)]);
        assert_eq!(
            validate_expense_request(&req),
            Err(ValidationError::ShareCountMismatch {
                participants: 2,
                shares: 1
            })
        );

        req.share_values = None;
        assert_eq!(
            validate_expense_request(&req),
            Err(ValidationError::ShareCountMismatch {
                participants: 2,
                shares: 0
            })
        );
    }

    #[test]
    fn test_negative_share_rejected() {
        let mut req = request();
        req.split_type = Some("PERCENTAGE".to_string());
        req.share_values = Some(vec![dec!(120), dec!(-20)]);
        assert!(matches!(
            validate_expense_request(&req),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_percentages_need_not_sum_to_100() {
        let mut req = request();
        req.split_type = Some("PERCENTAGE".to_string());
        req.share_values = Some(vec![dec!(10), dec!(20)]);
        assert!(validate_expense_request(&req).is_ok());
    }

    #[test]
    fn test_equal_ignores_share_values() {
        let mut req = request();
        req.split_type = Some("EQUAL".to_string());
        req.share_values = Some(vec![dec!(1)]);

        let draft = validate_expense_request(&req).unwrap();
        assert_eq!(draft.share_values, None);
    }
}
