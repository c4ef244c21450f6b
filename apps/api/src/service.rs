//! # Expense Service
//!
//! Orchestrates the pure core and the database for each ledger operation.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ExpenseRequest                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_expense_request ──► ValidationError (nothing stored)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  people().find_or_create(payer / participants)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_splits(amount, policy, participants, shares)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  expenses().create / update  ── one transaction                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Path
//! Balances and settlements are recomputed from a fresh ledger snapshot on
//! every call; nothing derived is cached or stored.

use thiserror::Error;
use tracing::{debug, info};

use divvy_core::validation::validate_expense_request;
use divvy_core::{
    balances_to_vec, compute_balances, compute_settlements, compute_splits, Balance, CoreError, Expense,
    ExpenseDraft, ExpenseRequest, Person, Settlement, ValidationError,
};
use divvy_db::{Database, DbError, NewExpense};

/// Errors surfaced by [`ExpenseService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad input or unknown expense.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Ledger operations exposed to the HTTP layer.
#[derive(Debug, Clone)]
pub struct ExpenseService {
    db: Database,
}

impl ExpenseService {
    pub fn new(db: Database) -> Self {
        ExpenseService { db }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Validates and records a new expense.
    ///
    /// An invalid request stores nothing, not even new people.
    pub async fn add_expense(&self, request: &ExpenseRequest) -> ServiceResult<Expense> {
        let draft = validate_expense_request(request)?;
        let new = self.prepare(draft).await?;

        let expense = self.db.expenses().create(new).await?;

        info!(
            id = %expense.id,
            payer = %expense.payer.name,
            amount = %expense.amount,
            policy = %expense.split_policy,
            "Expense added"
        );
        Ok(expense)
    }

    /// Replaces every field and split of an existing expense.
    ///
    /// ## Order of checks
    /// 1. Unknown id fails with `ExpenseNotFound`
    /// 2. The request is validated exactly as for [`add_expense`](Self::add_expense)
    /// 3. Fields and splits are swapped in one transaction
    ///
    /// A failed check leaves the stored expense untouched.
    pub async fn update_expense(&self, id: &str, request: &ExpenseRequest) -> ServiceResult<Expense> {
        if self.db.expenses().get_by_id(id).await?.is_none() {
            return Err(CoreError::ExpenseNotFound(id.to_string()).into());
        }

        let draft = validate_expense_request(request)?;
        let new = self.prepare(draft).await?;

        let expense = self.db.expenses().update(id, new).await?;

        info!(id = %expense.id, policy = %expense.split_policy, "Expense updated");
        Ok(expense)
    }

    /// Deletes an expense and its splits. Unknown ids fail with `NotFound`.
    pub async fn delete_expense(&self, id: &str) -> ServiceResult<()> {
        self.db.expenses().delete(id).await?;

        info!(id = %id, "Expense deleted");
        Ok(())
    }

    /// Every expense with its splits, oldest first.
    pub async fn list_expenses(&self) -> ServiceResult<Vec<Expense>> {
        Ok(self.db.expenses().list_all().await?)
    }

    /// Everyone ever referenced as payer or participant, by name.
    pub async fn list_people(&self) -> ServiceResult<Vec<Person>> {
        Ok(self.db.people().list_all().await?)
    }

    /// Net balance per person, in name order.
    pub async fn get_balances(&self) -> ServiceResult<Vec<Balance>> {
        let ledger = self.db.expenses().list_all().await?;
        Ok(balances_to_vec(&compute_balances(&ledger)))
    }

    /// A settle-up plan for the current balances.
    pub async fn get_settlements(&self) -> ServiceResult<Vec<Settlement>> {
        let ledger = self.db.expenses().list_all().await?;
        let settlements = compute_settlements(&compute_balances(&ledger));

        debug!(expenses = ledger.len(), transfers = settlements.len(), "Planned settlements");
        Ok(settlements)
    }

    /// Resolves people and computes splits for a validated draft.
    async fn prepare(&self, draft: ExpenseDraft) -> ServiceResult<NewExpense> {
        let payer = self.db.people().find_or_create(&draft.payer_name).await?;
        let participants = self.db.people().find_or_create_all(&draft.participant_names).await?;

        let shares = compute_splits(
            draft.amount,
            draft.split_policy,
            &participants,
            draft.share_values.as_deref(),
        )?;

        Ok(NewExpense {
            description: draft.description,
            amount: draft.amount,
            payer,
            split_policy: draft.split_policy,
            shares,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
