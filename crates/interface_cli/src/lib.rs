//! Command Line Interface
//!
//! This crate drives the invoicing engine from the command line: JSON
//! documents in, JSON reports out.
//!
//! # Architecture
//!
//! - **Handlers**: One function per command, pure apart from the rate port
//! - **DTOs**: Input documents and output reports
//! - **Config**: `ENGINE_*` environment configuration
//! - **Error Handling**: Typed command errors with a stable kind
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{config::EngineConfig, handlers::numbering::next_invoice_number};
//!
//! let response = next_invoice_number("INV-0041", 1)?;
//! assert_eq!(response.invoice_number, "INV-0042");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod dto;

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Reads and parses a JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}
