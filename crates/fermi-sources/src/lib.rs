//! fermi-sources: Question bank sources.
//!
//! Implements the `QuestionSource` trait for remote URLs, local files and
//! in-memory banks, and loads the `fermi.toml` configuration.

pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config_from, FermiConfig, SourceConfig};
pub use error::SourceError;
