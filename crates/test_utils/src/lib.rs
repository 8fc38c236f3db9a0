//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! invoicing engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `rate_sources`: In-memory rate source doubles
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod rate_sources;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use rate_sources::*;
pub use assertions::*;
pub use generators::*;
