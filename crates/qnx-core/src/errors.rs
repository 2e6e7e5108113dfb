//! Cross-cutting error types for Quannex.
//!
//! Engine-specific errors (`EngineError`, `InitializationError`) live in
//! `qnx-engine`; configuration errors live in `qnx-config`. This module only
//! covers failures that can arise while interpreting core vocabulary.

use thiserror::Error;

/// Errors raised while parsing or validating core types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A textual value did not match any recognized variant.
    #[error("Unrecognized {kind}: '{value}'")]
    Unrecognized { kind: &'static str, value: String },

    /// A face identifier fell outside `1..=12`.
    #[error("Face id out of range: {0} (expected 1..=12)")]
    FaceOutOfRange(i64),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
