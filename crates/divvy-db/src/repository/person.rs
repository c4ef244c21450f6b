//! # Person Repository
//!
//! People are created implicitly the first time a name is referenced as a
//! payer or participant, and are never deleted.
//!
//! ## Lookup-or-create
//! ```text
//! find_or_create("Alice")
//!     │
//!     ├── INSERT ... ON CONFLICT(name) DO NOTHING
//!     └── SELECT id, name WHERE name = 'Alice'
//! ```
//! The conflict clause makes concurrent first references to the same name
//! converge on a single row.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use divvy_core::Person;

/// Repository for person database operations.
#[derive(Debug, Clone)]
pub struct PersonRepository {
    pool: SqlitePool,
}

impl PersonRepository {
    /// Creates a new PersonRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PersonRepository { pool }
    }

    /// Returns the person with this exact name, creating them if needed.
    ///
    /// Names are case-sensitive: "alice" and "Alice" are two people.
    pub async fn find_or_create(&self, name: &str) -> DbResult<Person> {
        let mut conn = self.pool.acquire().await?;
        find_or_create_in(&mut *conn, name).await
    }

    /// Resolves every name in order. Repeated names resolve to the same
    /// person and stay repeated in the output.
    pub async fn find_or_create_all(&self, names: &[String]) -> DbResult<Vec<Person>> {
        let mut conn = self.pool.acquire().await?;
        let mut people = Vec::with_capacity(names.len());
        for name in names {
            people.push(find_or_create_in(&mut *conn, name).await?);
        }
        Ok(people)
    }

    /// Looks a person up by name.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>("SELECT id, name FROM people WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(person)
    }

    /// Lists everyone ever referenced, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>("SELECT id, name FROM people ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(people)
    }

    /// Counts stored people.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Lookup-or-create on an already acquired connection. Shared by
/// `find_or_create` and `find_or_create_all`, so a batch resolves every name
/// on one connection.
async fn find_or_create_in(conn: &mut SqliteConnection, name: &str) -> DbResult<Person> {
    let inserted = sqlx::query(
        "INSERT INTO people (id, name, created_at) VALUES (?1, ?2, ?3) ON CONFLICT(name) DO NOTHING",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(name)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    if inserted.rows_affected() > 0 {
        debug!(name = %name, "Created person");
    }

    let person = sqlx::query_as::<_, Person>("SELECT id, name FROM people WHERE name = ?1")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

    Ok(person)
}

// =============================================================================
// Unit Tests
// =============================================================================
