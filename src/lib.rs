//! spendlog - receipt-driven personal expense tracking
//!
//! This library provides the core functionality for the spendlog expense
//! tracker: expenses entered by hand or read off receipt photos, recurring
//! charges that materialize as they fall due, monthly category budgets with
//! alerts, savings goals and spending reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, recurring charges, goals, etc.)
//! - `storage`: Key-value persistence, one JSON file per key
//! - `services`: Business logic layer
//! - `reports`: Read-only spending aggregations
//! - `ai`: Generative model client and prompts
//! - `export`: CSV and JSON export
//! - `cli` / `display`: Command handlers and terminal formatting
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use spendlog::config::{paths::SpendlogPaths, settings::Settings};
//! use spendlog::storage::Storage;
//!
//! let paths = SpendlogPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendlogError, SpendlogResult};
