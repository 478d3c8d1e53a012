//! Error types for the authorization engine

use std::fmt;
use thiserror::Error;

/// Result type alias for the authorization engine
pub type Result<T> = std::result::Result<T, AuthzError>;

/// A permission the caller was missing when a check was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequirement {
    /// Action that was required, e.g. `alert.notifications.receivers:read`
    pub action: String,
    /// Scope the action was evaluated against, if any
    pub scope: Option<String>,
}

impl fmt::Display for PermissionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{} on {}", self.action, scope),
            None => write!(f, "{}", self.action),
        }
    }
}

/// Main error type for the authorization engine
#[derive(Error, Debug)]
pub enum AuthzError {
    /// No identity could be resolved for the request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Identity resolved but the policy refused the request
    #[error("Forbidden: {reason}")]
    Forbidden {
        reason: String,
        requirement: Option<PermissionRequirement>,
    },

    /// Permission check client failures
    #[error("Access client error: {0}")]
    Client(String),

    /// The caller's deadline expired while waiting on the access client
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
