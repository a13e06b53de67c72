//! Error types for answer parsing and question bank loading.
//!
//! `AnswerError` is recoverable at the prompt: the quiz stays on the same
//! question. `BankError` means the quiz cannot start at all.

use thiserror::Error;

/// Why a typed answer was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    /// Nothing was typed.
    #[error("please enter a number")]
    Empty,

    /// The input is not a finite number.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// Zero has no order of magnitude.
    #[error("the estimate must be greater than zero")]
    Zero,

    /// Negative quantities have no order of magnitude.
    #[error("the estimate must be positive")]
    Negative,
}

/// Errors that can occur when turning a raw payload into a question bank.
#[derive(Debug, Error)]
pub enum BankError {
    /// The payload could not be parsed in the given format.
    #[error("malformed {format} payload from {origin}: {message}")]
    Malformed {
        format: String,
        origin: String,
        message: String,
    },

    /// The payload parsed, but no usable questions remained.
    #[error("no valid questions found in {0}")]
    Empty(String),
}
