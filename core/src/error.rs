//! Error types for registration, parsing, and declaration loading.
//!
//! Every error is recoverable: a registration error rejects only the offending
//! parameter, and a parse error aborts only the current
//! [`Parser::parse`](crate::Parser::parse) call.

use thiserror::Error;

use crate::SpecId;

/// Errors raised while registering a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The spelling is already bound to another parameter.
    #[error("parameter {0} already registered")]
    DuplicateRegistration(String),
    /// The parameter has neither a short nor a long spelling.
    #[error("parameter must define a short or long name")]
    MissingName,
    /// A spelling cannot be typed as a flag.
    #[error("invalid parameter name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
    /// `min_arity` exceeds `max_arity`, or a leading or directive parameter
    /// lost its fixed arity.
    #[error("invalid arity for {name}: min {min}, max {max}")]
    InvalidArity { name: String, min: usize, max: usize },
}

/// Errors raised while scanning a token vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No registered spelling matches the token.
    #[error("unknown option {0}")]
    UnknownFlag(String),
    /// The token abbreviates more than one long spelling.
    #[error("{token} is ambiguous (could be {})", .candidates.join(", "))]
    AmbiguousFlag {
        token: String,
        candidates: Vec<String>,
    },
    /// A flag closed with fewer arguments than its minimum arity.
    #[error("at least {required} additional arguments should be provided for {name}, found {found}")]
    InsufficientArgs {
        id: SpecId,
        name: String,
        required: usize,
        found: usize,
    },
    /// A required parameter never appeared.
    #[error("missing required arg: {name}")]
    MissingRequiredParameter { id: SpecId, name: String },
    /// Fewer positional arguments than the declared minimum.
    #[error("{found} positional args provided, expected at least {min} positional args")]
    TooFewPositionals { found: usize, min: usize },
    /// A positional argument beyond the declared maximum.
    #[error("unknown positional arg: {0}")]
    UnexpectedPositional(String),
}

/// Errors raised while loading or building a [`Declaration`](crate::Declaration).
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A declared parameter was rejected by the registry.
    #[error("invalid declaration: {0}")]
    Registration(#[from] RegistrationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = ParseError::AmbiguousFlag {
            token: "--li".to_string(),
            candidates: vec!["--license".to_string(), "--list".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "--li is ambiguous (could be --license, --list)"
        );
    }

    #[test]
    fn test_insufficient_args_message() {
        let err = ParseError::InsufficientArgs {
            id: SpecId(0),
            name: "--files".to_string(),
            required: 2,
            found: 1,
        };

        assert_eq!(
            err.to_string(),
            "at least 2 additional arguments should be provided for --files, found 1"
        );
    }
}
