//! Error types for slog++

pub type Result<T> = std::result::Result<T, SlogError>;

#[derive(Debug, thiserror::Error)]
pub enum SlogError {
    /// A file sink could not open its destination
    #[error("File sink error for '{path}': {source}")]
    FileSink {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    IoOperation {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Declarative configuration could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Configuration the library does not support
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// Argument outside of what the callee can represent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SlogError {
    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, source: std::io::Error) -> Self {
        SlogError::FileSink {
            path: path.into(),
            source,
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        SlogError::IoOperation {
            operation: operation.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        SlogError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        SlogError::UnsupportedConfiguration(msg.into())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SlogError::InvalidArgument(msg.into())
    }
}
