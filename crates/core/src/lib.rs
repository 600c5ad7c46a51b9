//! Core library: document ingestion, keyword views, risk reports,
//! classification and alerting front-ends, dashboard reference data.

pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod extractor;
pub mod keywords;
pub mod models;
pub mod notifier;
pub mod pipeline;
pub mod report;

pub use error::{Result, RiskError};
