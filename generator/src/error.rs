use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";

/// Result type for the `player_fluent_generator` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Generation failures
///
/// Recoverable conditions (depth limits, unresolvable references, unresolved
/// imports) never surface here; they produce fallbacks or warnings instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A strategy met a type it cannot classify: a bug in the analyzer, not bad input
    #[error("Type analysis failed: {0}")]
    Analysis(String),

    /// Generator configuration could not be read
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Builders can only be generated for object types
    #[error("Type '{type_name}' is not an object type (found '{kind}')")]
    NotAnObjectType {
        /// Name of the offending type
        type_name: String,
        /// Node kind it actually has
        kind:      String,
    },

    /// A type expression or generic parameter list failed to parse
    #[error("Invalid type expression '{input}': {reason}")]
    Syntax {
        /// Text that was being parsed
        input:  String,
        /// What went wrong
        reason: String,
    },

    /// The XLR document could not be read
    #[error("{0}")]
    Xlr(String),
}

impl Error {
    /// Create a "Failed to X" analysis error
    pub fn failed_to(action: &str, details: impl std::fmt::Display) -> Self {
        Self::Analysis(format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"))
    }

    /// Create an "Invalid X" configuration error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidConfig(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create a syntax error for the given input
    pub fn syntax(input: &str, reason: impl std::fmt::Display) -> Self {
        Self::Syntax {
            input:  input.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<player_xlr::Error> for Error {
    fn from(error: player_xlr::Error) -> Self { Self::Xlr(error.to_string()) }
}
