//! # divvy-core: Pure Business Logic for Divvy
//!
//! This crate is the **heart** of Divvy. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Divvy Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   HTTP API (apps/api, axum)                     │   │
//! │  │   POST/PUT/DELETE /expenses   GET /expenses/balances|settlements│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ divvy-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐ │   │
//! │  │   │validation │  │   split   │  │  balance  │  │ settlement │ │   │
//! │  │   │  request  │─►│ calculator│  │ aggregator│─►│  planner   │ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    divvy-db (Database Layer)                    │   │
//! │  │          SQLite people / expenses / expense_splits              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Person, Expense, Split, Balance, Settlement)
//! - [`money`] - Decimal money with the fixed half-up currency rounding
//! - [`error`] - Domain error types
//! - [`validation`] - Request validation
//! - [`split`] - Split calculator (EQUAL / EXACT / PERCENTAGE)
//! - [`balance`] - Balance aggregator
//! - [`settlement`] - Greedy settlement planner
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **No I/O**: callers hand in a ledger snapshot; nothing is read here
//! 3. **Decimal Money**: no floating point anywhere
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use divvy_core::balance::Balances;
//! use divvy_core::settlement::compute_settlements;
//! use divvy_core::Money;
//! use rust_decimal::Decimal;
//!
//! let balances = Balances::from([
//!     ("Alice".to_string(), Money::new(Decimal::new(6000, 2))),
//!     ("Bob".to_string(), Money::new(Decimal::new(-3000, 2))),
//!     ("Carol".to_string(), Money::new(Decimal::new(-3000, 2))),
//! ]);
//!
//! let plan = compute_settlements(&balances);
//! assert_eq!(plan.len(), 2);
//! assert!(plan.iter().all(|s| s.to == "Alice"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod balance;
pub mod error;
pub mod money;
pub mod settlement;
pub mod split;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use balance::{balances_to_vec, compute_balances, Balances};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use settlement::compute_settlements;
pub use split::compute_splits;
pub use types::*;
