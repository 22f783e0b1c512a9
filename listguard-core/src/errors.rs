//! errors.rs - Custom error types for the listguard-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `listguard-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GuardError {
    #[error("Failed to compile spam pattern '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Pattern '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    /// Raised at the input boundary when the caller hands over something that
    /// is not text (e.g. bytes that are not valid UTF-8).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading input failed (see [`crate::text::read_text`]).
    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
