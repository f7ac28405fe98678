use thiserror::Error;

/// Errors returned by native functions when their arguments do not fit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    /// The wrong number of arguments was supplied.
    #[error("expected {expected} argument(s), got {found}")]
    ArgumentCountMismatch {
        /// Human-readable description of the accepted counts.
        expected: String,
        /// Number of arguments actually passed.
        found:    usize,
    },
    /// An argument had the wrong kind or an out-of-range value.
    #[error("argument {index}: {details}")]
    InvalidArgument {
        /// Zero-based argument index.
        index:   usize,
        /// What was wrong with it.
        details: String,
    },
}
