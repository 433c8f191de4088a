//! Export module for Messbook
//!
//! Provides data export in multiple formats:
//! - CSV: monthly statements (spreadsheet-compatible), written by
//!   [`MonthlyReport::export_csv`](crate::reports::MonthlyReport::export_csv)
//! - JSON: machine-readable full export and statements
//! - YAML: human-readable full export and statements

pub mod json;
pub mod yaml;

pub use json::{
    export_full_json, export_statement_json, ExportMetadata, FullExport, StatementExport,
    EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_full_yaml, export_statement_yaml};
