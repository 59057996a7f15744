//! Client Error Types

use std::path::{Path, PathBuf};

use crate::host::error::HostError;
use crate::queue::error::QueueError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GtmError {
    /// Invalid configuration value (container list, data layer name, host)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file could not be read
    #[error("{message}")]
    ConfigFile { path: PathBuf, message: String },

    /// Configuration file is not valid TOML or has the wrong shape
    #[error("{message}")]
    ConfigParse { message: String },

    /// The page host refused an operation
    #[error("Host error: {message}")]
    Host { message: String },
}

impl GtmError {
    pub fn config(message: impl Into<String>) -> Self {
        GtmError::Config {
            message: message.into(),
        }
    }

    pub(crate) fn config_file(path: &Path, error: &std::io::Error) -> Self {
        GtmError::ConfigFile {
            path: path.to_path_buf(),
            message: format!(
                "Cannot read configuration file {}: {}",
                path.display(),
                error
            ),
        }
    }
}

impl From<toml::de::Error> for GtmError {
    fn from(error: toml::de::Error) -> Self {
        GtmError::ConfigParse {
            message: format!("Invalid configuration: {}", error.message()),
        }
    }
}

impl From<HostError> for GtmError {
    fn from(error: HostError) -> Self {
        GtmError::Host {
            message: error.to_string(),
        }
    }
}

impl From<QueueError> for GtmError {
    fn from(error: QueueError) -> Self {
        GtmError::Host {
            message: error.to_string(),
        }
    }
}

impl crate::core::error_handling::ContextualError for GtmError {
    fn is_user_actionable(&self) -> bool {
        match self {
            GtmError::Config { .. } => true,
            GtmError::ConfigFile { .. } => true,
            GtmError::ConfigParse { .. } => true,
            GtmError::Host { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            GtmError::Config { message }
            | GtmError::ConfigFile { message, .. }
            | GtmError::ConfigParse { message } => Some(message),
            GtmError::Host { .. } => None,
        }
    }
}

pub type GtmResult<T> = Result<T, GtmError>;
