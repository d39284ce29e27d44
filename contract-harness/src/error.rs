//! Ways a contract case can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractMismatch {
    #[error("fixture `{name}` unusable: {reason}")]
    Fixture { name: String, reason: String },

    #[error("expected {expected} request, client sent {actual}")]
    Method { expected: String, actual: String },

    #[error("expected path `{expected}`, client sent `{actual}`")]
    Path { expected: String, actual: String },

    #[error("request is missing the bearer authorization header")]
    Authorization,

    #[error("request body mismatch: expected {expected}, client sent {actual}")]
    Body { expected: String, actual: String },

    #[error("expected exactly one request, client sent {actual}")]
    RequestCount { actual: usize },

    #[error("operation did not complete")]
    NoCompletion,

    #[error("decoded value mismatch: expected {expected}, got {actual}")]
    Value { expected: String, actual: String },

    #[error("expected completion without a value, got {actual}")]
    UnexpectedValue { actual: String },

    #[error("expected success, operation failed: {error}")]
    UnexpectedError { error: String },

    #[error("error did not satisfy the expectation: {error}")]
    WrongError { error: String },

    #[error("expected failure, operation returned {actual}")]
    UnexpectedSuccess { actual: String },
}
