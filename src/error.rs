use crate::syntax::TypeKind;
use thiserror::Error;

/// Errors raised while parsing the compact type grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Unknown type kind '{token}' in '{expr}'")]
    UnknownKind { token: String, expr: String },

    #[error("Expected a type kind before '{rest}' in '{expr}'")]
    MissingKind { rest: String, expr: String },

    #[error("Type '{kind}' expects {expected} child type(s), but {found} were given")]
    ArityMismatch {
        kind: TypeKind,
        expected: usize,
        found: usize,
    },

    #[error("Property {index} of object '{type_name}' has no binding name")]
    MissingBindingName { type_name: String, index: usize },

    #[error("Unterminated '{open}' group in '{expr}'")]
    UnterminatedGroup { open: char, expr: String },

    #[error("Unexpected trailing input '{rest}' in '{expr}'")]
    TrailingInput { rest: String, expr: String },

    #[error("Empty type expression")]
    EmptyExpression,
}

/// Errors raised during code generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("The {language} generator does not support '{kind}' types")]
    UnsupportedType {
        language: &'static str,
        kind: TypeKind,
    },

    #[error("Custom type '{type_name}' is referenced by the signature, but no declaration was provided")]
    MissingTypeDefinition { type_name: String },
}

/// Errors raised when a test run cannot be started or driven.
///
/// Adjudication results (compile failure, wrong answer, ...) are not errors;
/// they are reported through [`RunOutcome`](crate::runner::RunOutcome).
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Another test run is already in progress")]
    AlreadyRunning,

    #[error("Test case {index} is not a valid semicolon-delimited record: {message}")]
    MalformedTestCase { index: usize, message: String },

    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
