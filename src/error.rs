use thiserror::Error;

/// Configuration errors in a grammar.
///
/// These are never backtracked: a grammar that references a missing expression is
/// malformed regardless of the input, so the parse is aborted instead of reporting
/// a match failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrammarError {
    #[error(
        "Unknown expression: '{expression}' is not defined in grammar '{grammar}' (referenced from '{referenced_from}')"
    )]
    UnknownExpression {
        expression: String,
        grammar: String,
        referenced_from: String,
    },
    #[error(
        "Unknown grammar: '{grammar}' is not imported by grammar '{active}' (referenced from '{referenced_from}')"
    )]
    UnknownGrammar {
        grammar: String,
        active: String,
        referenced_from: String,
    },
    #[error("Missing root: grammar '{grammar}' has no root expression")]
    MissingRoot { grammar: String },
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("Depth exceeded: recursion limit {limit} reached while matching '{expression}'")]
    DepthExceeded { limit: usize, expression: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EngineResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Returns the grammar error behind this error, if any.
    pub fn as_grammar_error(&self) -> Option<&GrammarError> {
        match self {
            Error::Grammar(e) => Some(e),
            _ => None,
        }
    }
}
