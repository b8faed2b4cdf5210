//! Errors raised while reconciling a hosted zone.

use crate::modules::ModuleError;
use thiserror::Error;

/// Result type for hosted zone operations
pub type ZoneResult<T> = Result<T, ZoneError>;

/// Errors that abort a hosted zone reconcile.
///
/// Every variant is terminal for the invocation: nothing is retried and
/// nothing already issued is rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    /// The request is malformed or contradicts the zone that already exists.
    #[error("{0}")]
    Validation(String),

    /// A Route53 call failed. `code` is the service error code when the
    /// provider returned one.
    #[error("{operation} failed: {message}")]
    Provider {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    /// The requested reusable delegation set does not exist.
    #[error("The specified delegation set was not found: {0}")]
    DelegationSetNotFound(String),

    /// Connection settings are missing or unusable.
    #[error("{0}")]
    Configuration(String),
}

impl ZoneError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn provider(
        operation: &'static str,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            operation,
            code,
            message: message.into(),
        }
    }

    /// Service error code, if the provider supplied one
    pub fn code(&self) -> Option<&str> {
        match self {
            ZoneError::Provider { code, .. } => code.as_deref(),
            ZoneError::DelegationSetNotFound(_) => Some("NoSuchDelegationSet"),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ZoneError::Validation(_))
    }
}

impl From<ZoneError> for ModuleError {
    fn from(err: ZoneError) -> Self {
        match err {
            ZoneError::Validation(msg) => ModuleError::InvalidParameter(msg),
            ZoneError::Configuration(msg) => ModuleError::Configuration(msg),
            other @ (ZoneError::Provider { .. } | ZoneError::DelegationSetNotFound(_)) => {
                ModuleError::Provider {
                    code: other.code().map(str::to_string),
                    message: other.to_string(),
                }
            }
        }
    }
}
