//! Tally - transactions with pending holds and calculator-style amount entry
//!
//! This library provides the core functionality for the `tally` command-line
//! ledger. Amounts are typed as arithmetic expressions, transactions dated in
//! the future or explicitly held stay pending until confirmed, and recurring
//! templates generate transactions as they fall due.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `calc`: Amount expression evaluator
//! - `pending`: Pending-transaction policy (confirm/hold eligibility, list split)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, recurring templates, money)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer, including the foreground recurring sync
//! - `audit`: Audit logging system
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust
//! use tally::calc::parse_math_expression;
//!
//! assert_eq!(parse_math_expression("12.50+3*2"), Ok(18.5));
//! ```

pub mod audit;
pub mod calc;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod pending;
pub mod services;
pub mod storage;

pub use error::TallyError;
