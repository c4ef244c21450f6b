//! # divvy-api: HTTP API for Divvy
//!
//! JSON over HTTP for recording shared expenses and reading back balances
//! and a settle-up plan.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         API Layers                                      │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────────┐  ┌───────────────────────┐ │
//! │  │  routes        │  │  ExpenseService    │  │  divvy-core           │ │
//! │  │                │  │                    │  │                       │ │
//! │  │ • envelope     │─►│ • add / update     │─►│ • validation          │ │
//! │  │ • status codes │  │ • delete           │  │ • split calculator    │ │
//! │  │ • JSON bodies  │  │ • balances / plan  │  │ • balances / planner  │ │
//! │  └────────────────┘  └─────────┬──────────┘  └───────────────────────┘ │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                      ┌────────────────────┐                            │
//! │                      │  divvy-db (SQLite) │                            │
//! │                      └────────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `DIVVY_HTTP_HOST` - bind interface (default: 127.0.0.1)
//! - `DIVVY_HTTP_PORT` - HTTP port (default: 8080)
//! - `DIVVY_DB_PATH` - SQLite file (default: platform data directory)
//! - `DIVVY_DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `RUST_LOG` - log filter (default: `info,divvy=debug,sqlx=warn`)

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use routes::router;
pub use service::{ExpenseService, ServiceError};
