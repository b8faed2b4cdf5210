//! Error types for rustible-route53.
//!
//! Library code below the module layer reports [`ModuleError`]; this type is
//! what the binary and the config loader work with, and it decides the
//! process exit code.

use crate::modules::ModuleError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rustible-route53 operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for rustible-route53.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Module Errors
    // ========================================================================
    /// No module registered under this name.
    #[error("Module '{0}' not found")]
    ModuleNotFound(String),

    /// Module arguments are missing, malformed or contradictory.
    #[error("Invalid arguments for module '{module}': {message}")]
    ModuleArgs {
        /// Module name
        module: String,
        /// Error message
        message: String,
    },

    /// The module ran and the provider rejected a call.
    #[error("Module '{module}' failed: {message}")]
    ModuleExecution {
        /// Module name
        module: String,
        /// Service error code, when the provider returned one
        code: Option<String>,
        /// Error message
        message: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Connection settings are missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A config file exists but could not be read or parsed.
    #[error("Failed to load config '{path}': {message}")]
    ConfigLoad {
        /// Config file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// A module argument file could not be read or parsed.
    #[error("Failed to read module arguments from '{path}': {message}")]
    ArgsFile {
        /// Argument file (`-` for stdin)
        path: PathBuf,
        /// Error message
        message: String,
    },

    // ========================================================================
    // Wrapped Errors
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Anything else, with optional context.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
        /// Source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Classify a module failure.
    pub fn from_module(module: &str, err: ModuleError) -> Self {
        match err {
            ModuleError::NotFound(name) => Error::ModuleNotFound(name),
            ModuleError::InvalidParameter(_) | ModuleError::MissingParameter(_) => {
                Error::ModuleArgs {
                    module: module.to_string(),
                    message: err.to_string(),
                }
            }
            ModuleError::Configuration(message) => Error::Configuration(message),
            ModuleError::Provider { code, message } => Error::ModuleExecution {
                module: module.to_string(),
                code,
                message,
            },
            ModuleError::ExecutionFailed(message) => Error::ModuleExecution {
                module: module.to_string(),
                code: None,
                message,
            },
            other => Error::ModuleExecution {
                module: module.to_string(),
                code: None,
                message: other.to_string(),
            },
        }
    }

    /// Provider error code carried by a failed module run
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::ModuleExecution { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Message reported to the user, without the module name decoration
    pub fn user_message(&self) -> String {
        match self {
            Error::ModuleArgs { message, .. } | Error::ModuleExecution { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ModuleExecution { .. } => 2,
            Error::Configuration(_) | Error::ConfigLoad { .. } => 3,
            Error::ModuleArgs { .. } | Error::ArgsFile { .. } => 4,
            _ => 1,
        }
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Other {
            message: message.into(),
            source: Some(Box::new(e)),
        })
    }
}
