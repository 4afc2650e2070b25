use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the collection agent
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("IO error: {source}")]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    #[error("Empty configuration: {message}")]
    EmptyConfiguration { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Classification failed: {message}")]
    Classification { message: String },
}

impl AgentError {
    /// Create a new IO error with path context
    pub fn io_error(err: std::io::Error, path: Option<impl Into<PathBuf>>) -> Self {
        Self::Io {
            source: err,
            path: path.map(|p| p.into()),
        }
    }

    /// Create a new empty configuration error
    pub fn empty_configuration(message: impl Into<String>) -> Self {
        Self::EmptyConfiguration {
            message: message.into(),
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new classification error
    pub fn classification_error(message: impl Into<String>) -> Self {
        Self::Classification {
            message: message.into(),
        }
    }

    /// Whether the error came from the classification boundary and can be
    /// recovered with the keyword fallback
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AgentError::Classification { .. })
    }
}

impl From<std::io::Error> for AgentError {
    fn from(error: std::io::Error) -> Self {
        AgentError::io_error(error, None::<PathBuf>)
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(error: serde_json::Error) -> Self {
        AgentError::parse_error(error.to_string())
    }
}

impl From<serde_yaml::Error> for AgentError {
    fn from(error: serde_yaml::Error) -> Self {
        AgentError::parse_error(error.to_string())
    }
}

impl From<toml::ser::Error> for AgentError {
    fn from(error: toml::ser::Error) -> Self {
        AgentError::parse_error(error.to_string())
    }
}

impl From<reqwest::Error> for AgentError {
    fn from(error: reqwest::Error) -> Self {
        AgentError::classification_error(error.to_string())
    }
}

/// Result type alias using AgentError
pub type AgentResult<T> = Result<T, AgentError>;

/// Contextual error mapping function
pub fn map_io_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> AgentError {
    let path = path.into();
    move |err| AgentError::io_error(err, Some(path))
}
