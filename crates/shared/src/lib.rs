//! Shared configuration and error types for the sales report generator.
//!
//! This crate provides common types used across all other crates:
//! - Application configuration (input source, output paths, locale, chart dpi)
//! - The pipeline-wide error taxonomy and the stages it is reported against

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{ReportError, ReportResult, Stage};
