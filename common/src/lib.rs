//! Common utilities shared across the fraud-finder workspace
//!
//! This crate holds the configuration model and the YAML loading helpers
//! used by the scoring engine, the evaluator executable and its build
//! script.

pub mod config;
pub mod yaml_include;

pub use config::{Config, ConfigError};
