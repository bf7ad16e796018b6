use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for glue code that mixes error sources
pub type BoxResult<T> = std::result::Result<T, Box<dyn Error>>;

/// Result type for doctoc operations
pub type Result<T> = std::result::Result<T, DoctocError>;

/// Error types for doctoc operations
#[derive(Debug)]
pub enum DoctocError {
    /// An options string is neither a range (`hN-M`) nor a selector (`h1, h2`)
    InvalidConfigValue(String),
    /// A configuration field is present but has the wrong type, shape or range
    ConfigValidation {
        field: String,
        value: String,
        expected: String,
    },
    /// The serialization mode could not be resolved; this is a logic defect
    InternalInconsistency(String),
    /// The document engine rejected a query or the contents could not be decoded
    Document(String),
    /// IO error wrapper
    Io(io::Error),
    /// Generic error message
    Generic(String),
}

impl DoctocError {
    /// Build a validation error for `field` holding `value`
    pub fn validation(field: &str, value: impl fmt::Display, expected: &str) -> Self {
        DoctocError::ConfigValidation {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Whether this error was raised while combining or validating options
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DoctocError::InvalidConfigValue(_) | DoctocError::ConfigValidation { .. }
        )
    }
}

impl fmt::Display for DoctocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctocError::InvalidConfigValue(value) => {
                write!(f, "options string '{}' is invalid", value)
            }
            DoctocError::ConfigValidation { field, value, expected } => {
                write!(f, "options.{}: [{}] {}", field, value, expected)
            }
            DoctocError::InternalInconsistency(msg) => write!(f, "internal error: {}", msg),
            DoctocError::Document(msg) => write!(f, "Document error: {}", msg),
            DoctocError::Io(err) => write!(f, "IO error: {}", err),
            DoctocError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for DoctocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DoctocError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DoctocError {
    fn from(err: io::Error) -> Self {
        DoctocError::Io(err)
    }
}

impl From<String> for DoctocError {
    fn from(msg: String) -> Self {
        DoctocError::Generic(msg)
    }
}

impl From<&str> for DoctocError {
    fn from(msg: &str) -> Self {
        DoctocError::Generic(msg.to_string())
    }
}
