use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for docref operations.
///
/// This enum represents all possible error types that can occur while casting
/// and transforming reference field values. Each error kind describes a
/// specific category of failure and carries the structured context needed for
/// diagnostics, enabling precise error handling without parsing messages.
///
/// # Examples
///
/// ```rust,ignore
/// use docref::errors::{DocRefError, ErrorKind, DocRefResult};
///
/// fn example() -> DocRefResult<()> {
///     Err(DocRefError::new("Id value out of range", ErrorKind::InvalidId))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Cast Errors - raised when input matches no recognized shape
    /// Input value cannot be cast to the named field kind
    Cast {
        /// The field kind the value was being cast to (e.g. "db ref")
        target_kind: String,
    },

    // ID and Identity Errors - raised by the identifier layer
    /// The provided ID is invalid or failed to parse
    InvalidId,

    // Query Errors - raised during query-condition building
    /// The query operator is outside the supported set for the field kind
    UnsupportedOperator {
        /// The rejected operator token (e.g. "$xor")
        operator: String,
    },

    // Validation Errors - raised by the required check
    /// A required field holds no reference value
    MissingRequiredField,

    // Operation Errors - raised for invalid/unsupported operations
    /// The operation is not valid in the current context
    InvalidOperation,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Cast { target_kind } => write!(f, "Cast error for kind '{}'", target_kind),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::UnsupportedOperator { operator } => {
                write!(f, "Unsupported operator '{}'", operator)
            }
            ErrorKind::MissingRequiredField => write!(f, "Missing required field"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom docref error type.
///
/// `DocRefError` encapsulates error information including the error message,
/// kind, optional offending value, and optional cause. It supports error
/// chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use docref::errors::{DocRefError, ErrorKind};
///
/// // Create a simple error
/// let err = DocRefError::new("Id value out of range", ErrorKind::InvalidId);
///
/// // Create an error with a cause
/// let cause = DocRefError::new("parse failed", ErrorKind::InvalidId);
/// let err = DocRefError::new_with_cause(
///     "Cannot cast value",
///     ErrorKind::Cast { target_kind: "db ref".to_string() },
///     cause,
/// );
/// ```
///
/// # Type alias
///
/// The `DocRefResult<T>` type alias is equivalent to `Result<T, DocRefError>`
/// and is used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct DocRefError {
    message: String,
    error_kind: ErrorKind,
    offending_value: Option<String>,
    cause: Option<Box<DocRefError>>,
    backtrace: Backtrace,
}

impl DocRefError {
    /// Creates a new `DocRefError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    ///
    /// # Returns
    ///
    /// A new `DocRefError` instance.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DocRefError {
            message: message.to_string(),
            error_kind,
            offending_value: None,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `DocRefError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    ///
    /// # Returns
    ///
    /// A new `DocRefError` instance with the cause error attached.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DocRefError) -> Self {
        DocRefError {
            message: message.to_string(),
            error_kind,
            offending_value: None,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    /// Attaches the rendered offending value to this error.
    ///
    /// Cast errors carry the value that matched no recognized shape so that
    /// validation failures surfaced by the host mapper can name it.
    pub fn with_offending_value(mut self, value: impl Into<String>) -> Self {
        self.offending_value = Some(value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn offending_value(&self) -> Option<&str> {
        self.offending_value.as_deref()
    }

    pub fn cause(&self) -> Option<&DocRefError> {
        self.cause.as_deref()
    }
}

impl Display for DocRefError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DocRefError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for DocRefError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for docref operations.
///
/// `DocRefResult<T>` is shorthand for `Result<T, DocRefError>`.
/// All fallible docref operations return this type.
pub type DocRefResult<T> = Result<T, DocRefError>;

// From trait implementations for automatic error conversion
impl From<std::num::ParseIntError> for DocRefError {
    fn from(err: std::num::ParseIntError) -> Self {
        DocRefError::new(
            &format!("Id parsing error: {}", err),
            ErrorKind::InvalidId,
        )
    }
}

impl From<String> for DocRefError {
    fn from(msg: String) -> Self {
        DocRefError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for DocRefError {
    fn from(msg: &str) -> Self {
        DocRefError::new(msg, ErrorKind::InternalError)
    }
}
