//! Configuration module for Messbook
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Settings persistence, including the participant roster

pub mod paths;
pub mod settings;

pub use paths::MessbookPaths;
pub use settings::Settings;
