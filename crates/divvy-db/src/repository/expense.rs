//! # Expense Repository
//!
//! Database operations for expenses and their owned splits.
//!
//! ## Atomic Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create()         BEGIN → INSERT expense → INSERT splits → COMMIT       │
//! │  update()         BEGIN → UPDATE expense → DELETE splits                │
//! │                         → INSERT splits → COMMIT                        │
//! │  replace_splits() BEGIN → touch expense → DELETE/INSERT splits → COMMIT │
//! │  delete()         BEGIN → DELETE splits → DELETE expense → COMMIT       │
//! │                                                                         │
//! │  Any error drops the transaction, which rolls it back.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads load the expense rows and their split rows inside one transaction,
//! so callers never see an expense whose splits are half replaced.
//!
//! ## Money Columns
//! Amounts and share values are stored as decimal strings and parsed back
//! with [`Decimal::from_str`]; no floating point is involved on the way.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use divvy_core::{Expense, Money, Person, Split, SplitPolicy, SplitShare};

// =============================================================================
// Write Model
// =============================================================================

/// Everything needed to store an expense. Ids and timestamps are assigned by
/// the repository.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub payer: Person,
    pub split_policy: SplitPolicy,
    /// Calculator output, in participant order.
    pub shares: Vec<SplitShare>,
}

// =============================================================================
// Row Types
// =============================================================================

const EXPENSE_SELECT: &str = r#"
    SELECT
        e.id,
        e.description,
        e.amount,
        e.split_policy,
        e.created_at,
        p.id AS payer_id,
        p.name AS payer_name
    FROM expenses e
    JOIN people p ON p.id = e.payer_id
"#;

const SPLIT_SELECT: &str = r#"
    SELECT
        s.id,
        s.expense_id,
        s.person_id,
        p.name AS person_name,
        s.amount_owed,
        s.share_type,
        s.share_value
    FROM expense_splits s
    JOIN people p ON p.id = s.person_id
"#;

#[derive(Debug, FromRow)]
struct ExpenseRow {
    id: String,
    description: String,
    amount: String,
    split_policy: SplitPolicy,
    created_at: DateTime<Utc>,
    payer_id: String,
    payer_name: String,
}

#[derive(Debug, FromRow)]
struct SplitRow {
    id: String,
    expense_id: String,
    person_id: String,
    person_name: String,
    amount_owed: String,
    share_type: SplitPolicy,
    share_value: Option<String>,
}

fn parse_decimal(column: &str, raw: &str) -> DbResult<Decimal> {
    Decimal::from_str(raw).map_err(|_| DbError::invalid_stored(column, raw))
}

impl TryFrom<SplitRow> for Split {
    type Error = DbError;

    fn try_from(row: SplitRow) -> DbResult<Self> {
        let amount_owed = Money::new(parse_decimal("expense_splits.amount_owed", &row.amount_owed)?);
        let share_value = row
            .share_value
            .as_deref()
            .map(|raw| parse_decimal("expense_splits.share_value", raw))
            .transpose()?;

        Ok(Split {
            id: row.id,
            expense_id: row.expense_id,
            person: Person {
                id: row.person_id,
                name: row.person_name,
            },
            amount_owed,
            share_type: row.share_type,
            share_value,
        })
    }
}

impl ExpenseRow {
    fn into_expense(self, splits: Vec<Split>) -> DbResult<Expense> {
        Ok(Expense {
            amount: Money::new(parse_decimal("expenses.amount", &self.amount)?),
            id: self.id,
            description: self.description,
            payer: Person {
                id: self.payer_id,
                name: self.payer_name,
            },
            created_at: self.created_at,
            split_policy: self.split_policy,
            splits,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Gets an expense with its splits.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Expense>> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let row = sqlx::query_as::<_, ExpenseRow>(&format!("{EXPENSE_SELECT} WHERE e.id = ?1"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let split_rows = sqlx::query_as::<_, SplitRow>(&format!(
            "{SPLIT_SELECT} WHERE s.expense_id = ?1 ORDER BY s.position"
        ))
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        let splits = split_rows
            .into_iter()
            .map(Split::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        row.into_expense(splits).map(Some)
    }

    /// Loads the whole ledger: every expense with its splits, oldest first.
    ///
    /// This is the snapshot the balance aggregator and settlement planner
    /// work from.
    pub async fn list_all(&self) -> DbResult<Vec<Expense>> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let rows = sqlx::query_as::<_, ExpenseRow>(&format!(
            "{EXPENSE_SELECT} ORDER BY e.created_at, e.rowid"
        ))
        .fetch_all(&mut *tx)
        .await?;

        let split_rows = sqlx::query_as::<_, SplitRow>(&format!(
            "{SPLIT_SELECT} ORDER BY s.expense_id, s.position"
        ))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        let mut splits_by_expense: HashMap<String, Vec<Split>> = HashMap::new();
        for split_row in split_rows {
            let split = Split::try_from(split_row)?;
            splits_by_expense
                .entry(split.expense_id.clone())
                .or_default()
                .push(split);
        }

        let expenses = rows
            .into_iter()
            .map(|row| {
                let splits = splits_by_expense.remove(&row.id).unwrap_or_default();
                row.into_expense(splits)
            })
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = expenses.len(), "Loaded ledger");
        Ok(expenses)
    }

    /// Stores a new expense and its splits in one transaction.
    ///
    /// ## Returns
    /// The persisted expense with generated ids.
    pub async fn create(&self, new: NewExpense) -> DbResult<Expense> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(
            id = %id,
            payer = %new.payer.name,
            amount = %new.amount,
            policy = %new.split_policy,
            "Creating expense"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, description, amount, payer_id, split_policy, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(&id)
        .bind(&new.description)
        .bind(new.amount.amount().to_string())
        .bind(&new.payer.id)
        .bind(new.split_policy)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let splits = insert_splits(&mut *tx, &id, new.split_policy, &new.shares).await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(Expense {
            id,
            description: new.description,
            amount: new.amount,
            payer: new.payer,
            created_at: now,
            split_policy: new.split_policy,
            splits,
        })
    }

    /// Overwrites an expense and swaps in a fresh set of splits.
    ///
    /// `created_at` is kept. Fails with `NotFound` and changes nothing when
    /// the id is unknown.
    pub async fn update(&self, id: &str, new: NewExpense) -> DbResult<Expense> {
        debug!(id = %id, policy = %new.split_policy, "Updating expense");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let created_at: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT created_at FROM expenses WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(created_at) = created_at else {
            return Err(DbError::not_found("Expense", id));
        };

        sqlx::query(
            r#"
            UPDATE expenses SET
                description = ?2,
                amount = ?3,
                payer_id = ?4,
                split_policy = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&new.description)
        .bind(new.amount.amount().to_string())
        .bind(&new.payer.id)
        .bind(new.split_policy)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        delete_splits(&mut *tx, id).await?;
        let splits = insert_splits(&mut *tx, id, new.split_policy, &new.shares).await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(Expense {
            id: id.to_string(),
            description: new.description,
            amount: new.amount,
            payer: new.payer,
            created_at,
            split_policy: new.split_policy,
            splits,
        })
    }

    /// Replaces only the splits of an expense (and its recorded policy).
    pub async fn replace_splits(
        &self,
        id: &str,
        policy: SplitPolicy,
        shares: &[SplitShare],
    ) -> DbResult<Vec<Split>> {
        debug!(id = %id, policy = %policy, count = shares.len(), "Replacing splits");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let touched = sqlx::query("UPDATE expenses SET split_policy = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(policy)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        if touched.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        delete_splits(&mut *tx, id).await?;
        let splits = insert_splits(&mut *tx, id, policy, shares).await?;

        tx.commit().await.map_err(DbError::transaction)?;
        Ok(splits)
    }

    /// Deletes an expense together with its splits.
    ///
    /// Fails with `NotFound` when the id is unknown.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting expense");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        delete_splits(&mut *tx, id).await?;

        let deleted = sqlx::query("DELETE FROM expenses WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        tx.commit().await.map_err(DbError::transaction)?;
        Ok(())
    }

    /// Counts stored expenses.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Transaction Helpers
// =============================================================================

async fn delete_splits(conn: &mut SqliteConnection, expense_id: &str) -> DbResult<()> {
    sqlx::query("DELETE FROM expense_splits WHERE expense_id = ?1")
        .bind(expense_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn insert_splits(
    conn: &mut SqliteConnection,
    expense_id: &str,
    policy: SplitPolicy,
    shares: &[SplitShare],
) -> DbResult<Vec<Split>> {
    let mut splits = Vec::with_capacity(shares.len());

    for (position, share) in shares.iter().enumerate() {
        let split = Split {
            id: Uuid::new_v4().to_string(),
            expense_id: expense_id.to_string(),
            person: share.person.clone(),
            amount_owed: share.amount_owed,
            share_type: policy,
            share_value: share.share_value,
        };

        sqlx::query(
            r#"
            INSERT INTO expense_splits (
                id, expense_id, person_id, position, amount_owed, share_type, share_value
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&split.id)
        .bind(&split.expense_id)
        .bind(&split.person.id)
        .bind(position as i64)
        .bind(split.amount_owed.amount().to_string())
        .bind(split.share_type)
        .bind(split.share_value.map(|v| v.to_string()))
        .execute(&mut *conn)
        .await?;

        splits.push(split);
    }

    Ok(splits)
}

// =============================================================================
// Unit Tests
// =============================================================================
