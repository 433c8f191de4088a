//! Messbook - shared household expense tracker
//!
//! This library provides the core functionality for the Messbook command-line
//! application. A fixed roster of participants records what each of them paid
//! for the household; at the end of the month the settlement calculator splits
//! the total equally and works out who pays whom.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `settlement`: The pure equal-share settlement calculator
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, roster, money, months)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: The monthly statement
//! - `export`: JSON and YAML exports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `logging`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use messbook::config::{MessbookPaths, Settings};
//!
//! let paths = MessbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod settlement;
pub mod storage;

pub use error::{MessbookError, MessbookResult};
