use std::{fmt, io};

/// Crate-wide `Result` type using [`BashcompError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, BashcompError>;

/// Top-level error type for bashcomp operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum BashcompError {
    /// Completer-function resolution errors.
    Resolve(ResolveError),

    /// Bash subprocess invocation errors.
    Invoke(InvokeError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Resolution-specific errors.
///
/// Resolution failing to find a completer is *not* an error (the resolver
/// caches an empty string for that); only a malformed request is.
#[derive(Debug)]
pub enum ResolveError {
    /// An empty command name was passed to the resolver.
    EmptyCommandName,
}

/// Subprocess-invocation errors.
///
/// These are produced by the invoker and swallowed by the completion
/// engine, which logs them and returns an empty candidate list.
#[derive(Debug)]
pub enum InvokeError {
    /// The bash process could not be started.
    Spawn(String),

    /// The bash process exceeded the configured deadline, in milliseconds.
    Timeout(u64),

    /// The invocation was cancelled by the host.
    Cancelled,
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Generic configuration error.
    Generic(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for BashcompError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BashcompError::Resolve(e) => write!(f, "Resolution error: {e}"),
            BashcompError::Invoke(e) => write!(f, "Invocation error: {e}"),
            BashcompError::Config(e) => write!(f, "Configuration error: {e}"),
            BashcompError::Io(e) => write!(f, "I/O error: {e}"),
            BashcompError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::EmptyCommandName => {
                write!(f, "Command name must not be empty")
            }
        }
    }
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::Spawn(msg) => write!(f, "Failed to start bash: {msg}"),
            InvokeError::Timeout(ms) => {
                write!(f, "Bash did not finish within {ms}ms")
            }
            InvokeError::Cancelled => write!(f, "Invocation cancelled"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BashcompError {}
impl std::error::Error for ResolveError {}
impl std::error::Error for InvokeError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to BashcompError ========================= */

impl From<io::Error> for BashcompError {
    fn from(err: io::Error) -> Self {
        BashcompError::Io(err)
    }
}

impl From<ResolveError> for BashcompError {
    fn from(err: ResolveError) -> Self {
        BashcompError::Resolve(err)
    }
}

impl From<InvokeError> for BashcompError {
    fn from(err: InvokeError) -> Self {
        BashcompError::Invoke(err)
    }
}

impl From<ConfigError> for BashcompError {
    fn from(err: ConfigError) -> Self {
        BashcompError::Config(err)
    }
}

impl From<String> for BashcompError {
    fn from(msg: String) -> Self {
        BashcompError::Generic(msg)
    }
}

impl From<&str> for BashcompError {
    fn from(msg: &str) -> Self {
        BashcompError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_name_display() {
        let err = BashcompError::from(ResolveError::EmptyCommandName);
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_timeout_display_includes_deadline() {
        let err = InvokeError::Timeout(2000);
        assert!(err.to_string().contains("2000ms"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: BashcompError = io_err.into();
        assert!(matches!(err, BashcompError::Io(_)));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "completion.timeout_ms".to_string(),
            value: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("completion.timeout_ms"));
        assert!(msg.contains("abc"));
    }
}
