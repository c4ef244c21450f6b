//! # divvy-db: Database Layer for Divvy
//!
//! This crate provides persistent storage for the shared-expense ledger.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Divvy Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /expenses)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ExpenseService ── validate + compute splits (divvy-core)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     divvy-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │◄───│ PersonRepo     │    │  (embedded)  │ │   │
//! │  │   │  SqlitePool   │    │ ExpenseRepo    │    │ 001_init.sql │ │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (default: platform data dir / divvy.db)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Person and expense repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use divvy_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("divvy.db")).await?;
//! let ledger = db.expenses().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::expense::{ExpenseRepository, NewExpense};
pub use repository::person::PersonRepository;
