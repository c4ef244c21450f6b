//! # Repository Module
//!
//! Database repository implementations for the ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ExpenseService (apps/api)                                             │
//! │       │                                                                 │
//! │       │  db.people().find_or_create_all(&names)                        │
//! │       │  db.expenses().create(new_expense)                             │
//! │       ▼                                                                 │
//! │  PersonRepository              ExpenseRepository                       │
//! │  ├── find_or_create            ├── get_by_id / list_all                │
//! │  ├── find_or_create_all        ├── create / update                     │
//! │  ├── find_by_name              ├── replace_splits                      │
//! │  └── list_all                  └── delete                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PersonRepository`](person::PersonRepository) - People by name
//! - [`ExpenseRepository`](expense::ExpenseRepository) - Expenses and their splits

pub mod expense;
pub mod person;
