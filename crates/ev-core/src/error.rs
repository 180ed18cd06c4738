//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `EvError` as one variant
//! via `#[from]`, so time/unit failures surface unchanged at any layer.

use thiserror::Error;

/// Errors raised by the `ev-core` primitives.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("invalid duration unit {0:?}: expected \"s\", \"m\" or \"h\"")]
    InvalidUnit(String),
}

/// Shorthand result type for `ev-core`.
pub type EvResult<T> = Result<T, EvError>;
