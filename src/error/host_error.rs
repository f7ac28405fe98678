use thiserror::Error;

use crate::error::ParseError;

/// All syntax errors of one source, joined into a single message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("compile failed: {}", .errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct CompileError {
    /// The individual parse errors, in the order they were found.
    pub errors: Vec<ParseError>,
}

/// Failure to load a `SessionConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text was malformed or did not match the expected schema.
    #[error("invalid session config: {0}")]
    Parse(#[from] toml::de::Error),
}
