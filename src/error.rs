//! Error types for parbreak
//!
//! The optimizer can fail in exactly two ways: the caller's adjustment-ratio
//! budget is unsatisfiable, or an input item is malformed. Everything else
//! (oversize boxes, inelastic glue) is absorbed by the fallback breakpoint
//! mechanism in the optimizer and never surfaces as an error.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for parbreak operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the line-breaking entry points
///
/// # Examples
///
/// ```
/// use parbreak::Error;
///
/// let error = Error::InvalidItem {
///     index: 3,
///     reason: "glue shrink is negative".to_string(),
/// };
/// assert!(format!("{}", error).contains("index 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No breakpoint sequence satisfies the caller's hard `max_adjustment_ratio`,
    /// even after the threshold-relaxing retry logic.
    ///
    /// This is a recoverable signal: retry with hyphenation enabled, or with a
    /// larger (or unbounded) ratio budget.
    #[error("no layout satisfies the maximum adjustment ratio")]
    MaxAdjustmentExceeded,

    /// An input item is malformed: negative width, or glue with negative
    /// stretch or shrink. Programmer error; not retried.
    #[error("invalid item at index {index}: {reason}")]
    InvalidItem { index: usize, reason: String },
}
