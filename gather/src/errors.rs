use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for gather operations.
///
/// Each kind describes a category of failure, enabling precise error
/// handling by callers.
///
/// # Examples
///
/// ```rust,ignore
/// use gather::errors::{ErrorKind, GatherError, GatherResult};
///
/// fn example() -> GatherResult<()> {
///     Err(GatherError::new("Key not found", ErrorKind::KeyNotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Direct keyed access on a missing key
    KeyNotFound,
    /// A value cannot be encoded to JSON
    SerializationError,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Generic validation error
    ValidationError,
    /// Invalid data type for operation
    InvalidDataType,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::KeyNotFound => write!(f, "Key not found"),
            ErrorKind::SerializationError => write!(f, "Serialization error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom gather error type.
///
/// `GatherError` encapsulates the error message, kind, and optional cause.
/// It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use gather::errors::{ErrorKind, GatherError};
///
/// // Create a simple error
/// let err = GatherError::new("Key not found", ErrorKind::KeyNotFound);
///
/// // Create an error with a cause
/// let cause = GatherError::new("Non-finite float", ErrorKind::InvalidDataType);
/// let err = GatherError::new_with_cause("Encoding failed", ErrorKind::SerializationError, cause);
/// ```
#[derive(Clone)]
pub struct GatherError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<GatherError>>,
    backtrace: Atomic<Backtrace>,
}

impl GatherError {
    /// Creates a new `GatherError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        GatherError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `GatherError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: GatherError) -> Self {
        GatherError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&GatherError> {
        self.cause.as_deref()
    }
}

impl Display for GatherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for GatherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for GatherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for gather operations.
///
/// `GatherResult<T>` is shorthand for `Result<T, GatherError>`. All fallible
/// gather operations return this type.
pub type GatherResult<T> = Result<T, GatherError>;

impl From<std::num::ParseIntError> for GatherError {
    fn from(err: std::num::ParseIntError) -> Self {
        GatherError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<std::num::ParseFloatError> for GatherError {
    fn from(err: std::num::ParseFloatError) -> Self {
        GatherError::new(
            &format!("Float parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<std::fmt::Error> for GatherError {
    fn from(err: std::fmt::Error) -> Self {
        GatherError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}

impl From<String> for GatherError {
    fn from(msg: String) -> Self {
        GatherError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for GatherError {
    fn from(msg: &str) -> Self {
        GatherError::new(msg, ErrorKind::InternalError)
    }
}
