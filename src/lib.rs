//! # AWS Cost Analyzer
//!
//! Single-shot exporter for AWS Cost Explorer data across multiple
//! configured accounts. Each run fetches cost line items per account,
//! writes them to a flat CSV, derives per-service and per-account summary
//! tables, and optionally mirrors everything to a Google Sheet.
//!
//! ## Run shape
//!
//! Everything is sequential: one account after another, one API page after
//! another. The only state between runs is two small JSON files — the
//! accounts config and the persisted spreadsheet reference.

/// Per-account session setup and orchestration
pub mod account;

/// Per-service and per-account summary aggregation
pub mod aggregate;

/// Command-line argument parsing and date-range defaults
pub mod cli;

/// Accounts config and persisted sheet-reference files
pub mod config;

/// Cost Explorer fetch, pagination, and row flattening
pub mod cost;

/// Flat export CSV and run-log writers
pub mod export;

/// Data models for cost rows, periods, identities, and configs
pub mod models;

/// Google Sheets upload via the Sheets/Drive REST APIs
pub mod sheets;
