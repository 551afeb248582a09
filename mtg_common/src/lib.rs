//! Shared MTG building blocks
//!
//! Oracle catalog loading and caching, text normalization for comparable
//! card text, and the error type used across both.

pub mod error;
pub mod oracle;
pub mod text;

pub use error::{CommonError, Result};
pub use oracle::{OracleCatalog, OracleRecord, DEFAULT_ORACLE_URL};
pub use text::normalize_oracle;
