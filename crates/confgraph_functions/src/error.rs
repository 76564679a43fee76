//! Error types for adapting and calling functions.

use thiserror::Error;

/// Errors raised when adapting, registering or calling a function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    /// A parameter or the return type has no expression representation.
    #[error("function '{name}' has an unsupported signature: {reason}")]
    UnsupportedSignature {
        /// Function name.
        name: String,
        /// Which part of the signature is unsupported.
        reason: String,
    },

    /// The call supplied the wrong number of arguments.
    #[error("function '{name}' expects {expected} arguments, got {actual}")]
    ArgumentCount {
        /// Function name.
        name: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },

    /// An argument does not match its declared parameter type.
    #[error("function '{name}' argument {index}: {source}")]
    ArgumentType {
        /// Function name.
        name: String,
        /// Zero based argument position.
        index: usize,
        /// The mismatch.
        source: ConversionError,
    },

    /// The function body failed or returned a value of the wrong type.
    #[error("function '{name}' failed: {message}")]
    Execution {
        /// Function name.
        name: String,
        /// Failure description.
        message: String,
    },

    /// No function with this name is registered.
    #[error("unknown function: {0}")]
    Unknown(String),
}

impl FunctionError {
    /// Creates an [`UnsupportedSignature`](Self::UnsupportedSignature).
    pub fn unsupported(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedSignature {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`Execution`](Self::Execution).
    pub fn execution(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// A value could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {actual}")]
pub struct ConversionError {
    /// What the conversion needed.
    pub expected: String,
    /// What it was given.
    pub actual: String,
}

impl ConversionError {
    /// Creates a conversion error.
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
