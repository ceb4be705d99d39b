//! HTTP server module for the coverage backend.
//!
//! This module exposes the coverage session as a REST API consumed by the
//! dashboard. Handlers stay thin and delegate to the service layer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing and parameter validation                 │
//! │  - JSON / XLSX responses                                  │
//! │  - CORS, compression, tracing, error mapping              │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - CoverageSession: current upload and parameters         │
//! │  - Map layers, report tables, XLSX writer                 │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Core (algorithms/, parsing/, models/)                    │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
