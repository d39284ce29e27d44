//! What a case expects the operation to yield.

use std::fmt::Debug;

use cf_core::{ApiError, Outcome};

use crate::error::ContractMismatch;

/// Result types that can represent "completed, no value".
pub trait NoValue {
    fn is_no_value(&self) -> bool;
}

impl NoValue for () {
    fn is_no_value(&self) -> bool {
        true
    }
}

impl NoValue for Outcome<()> {
    fn is_no_value(&self) -> bool {
        matches!(self, Outcome::Completed(()))
    }
}

/// Check for "completed with no value". The field is private, so the only
/// way to get one is [`Expectation::completion`], which needs `T: NoValue`.
///
/// An operation that returns a value cannot be given one:
///
/// ```compile_fail
/// use cf_core::v2::GetInfoResponse;
/// use contract_harness::Expectation;
///
/// let _ = Expectation::<GetInfoResponse>::completion();
/// ```
///
/// ```compile_fail
/// use cf_core::v2::GetInfoResponse;
/// use contract_harness::{Completion, Expectation};
///
/// let _ = Expectation::<GetInfoResponse>::Completion(Completion { is_empty: |_| true });
/// ```
pub struct Completion<T> {
    is_empty: fn(&T) -> bool,
}

pub enum Expectation<T> {
    /// Structural equality with the decoded value.
    Value(T),
    /// Completion without a value. Build with [`Expectation::completion`].
    Completion(Completion<T>),
    /// A failure accepted by the predicate.
    Failure(fn(&ApiError) -> bool),
}

impl<T: NoValue> Expectation<T> {
    /// Only available for operations whose contract can return no value.
    pub fn completion() -> Self {
        Expectation::Completion(Completion {
            is_empty: T::is_no_value,
        })
    }
}

impl<T: Debug + PartialEq> Expectation<T> {
    pub fn check(&self, actual: Result<T, ApiError>) -> Result<(), ContractMismatch> {
        match (self, actual) {
            (Expectation::Value(expected), Ok(actual)) if *expected == actual => Ok(()),
            (Expectation::Value(expected), Ok(actual)) => Err(ContractMismatch::Value {
                expected: format!("{expected:?}"),
                actual: format!("{actual:?}"),
            }),
            (Expectation::Completion(completion), Ok(actual)) if (completion.is_empty)(&actual) => {
                Ok(())
            }
            (Expectation::Completion(_), Ok(actual)) => Err(ContractMismatch::UnexpectedValue {
                actual: format!("{actual:?}"),
            }),
            (Expectation::Failure(accepts), Err(error)) if accepts(&error) => Ok(()),
            (Expectation::Failure(_), Err(error)) => Err(ContractMismatch::WrongError {
                error: error.to_string(),
            }),
            (Expectation::Failure(_), Ok(actual)) => Err(ContractMismatch::UnexpectedSuccess {
                actual: format!("{actual:?}"),
            }),
            (_, Err(error)) => Err(ContractMismatch::UnexpectedError {
                error: error.to_string(),
            }),
        }
    }
}
