//! Error types for the CPython bridge

use thiserror::Error;

/// Result type alias for bridge operations
pub type PyResult<T> = Result<T, PyError>;

/// Structured error types for bridge operations
#[derive(Debug, Error)]
pub enum PyError {
    /// The host's resolver could not supply a required interpreter symbol.
    /// Fatal to the whole bridge; no partial binding is supported.
    #[error("failed to resolve interpreter symbol '{name}'")]
    MissingSymbol { name: &'static str },

    /// The interpreter could not allocate a foreign object.
    #[error("interpreter could not allocate {what}")]
    AllocationFailed { what: &'static str },

    /// The interpreter raised an exception. The pending-error indicator has
    /// already been reported (traceback to stderr) and cleared.
    #[error("interpreter raised an exception during {operation}")]
    Exception { operation: String },

    /// A scalar conversion was applied to an object of the wrong type.
    #[error("cannot convert value to {expected} (object type is {actual})")]
    Conversion {
        expected: &'static str,
        actual: String,
    },

    /// A result fell outside the scalar set the bridge can extract.
    #[error("unsupported result type {type_name}: only bool, int, float and str can be extracted")]
    UnsupportedType { type_name: String },

    /// Failure while opening or querying a dynamic library.
    #[error("interpreter library error: {0}")]
    Library(#[from] libloading::Error),

    /// Internal/unexpected error
    #[error("internal bridge error: {0}")]
    Internal(String),
}

impl PyError {
    /// Create an exception error for the given operation
    pub fn exception(operation: impl Into<String>) -> Self {
        Self::Exception {
            operation: operation.into(),
        }
    }

    /// Create a conversion error
    pub fn conversion(expected: &'static str, actual: impl Into<String>) -> Self {
        Self::Conversion {
            expected,
            actual: actual.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error came from the interpreter side (an exception was
    /// raised and has been cleared) rather than from the bridge itself.
    pub fn is_exception(&self) -> bool {
        matches!(self, Self::Exception { .. } | Self::Conversion { .. })
    }
}
