//! Helper functions for creating and classifying errors

use super::types::{AuthzError, PermissionRequirement};

const GENERIC_DENIAL: &str = "permission denied";

impl AuthzError {
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden<S: Into<String>>(reason: S) -> Self {
        Self::Forbidden {
            reason: reason.into(),
            requirement: None,
        }
    }

    /// Forbidden error tagged with the permission the caller lacked
    pub fn missing_permission<A: Into<String>>(action: A, scope: Option<String>) -> Self {
        let requirement = PermissionRequirement {
            action: action.into(),
            scope,
        };
        Self::Forbidden {
            reason: format!("missing permission: {}", requirement),
            requirement: Some(requirement),
        }
    }

    pub fn client<S: Into<String>>(message: S) -> Self {
        Self::Client(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl AuthzError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// Anything that is neither a policy refusal nor a missing identity
    pub fn is_system_fault(&self) -> bool {
        !self.is_unauthorized() && !self.is_forbidden()
    }

    /// Permission requirement attached to a forbidden error, if known
    pub fn requirement(&self) -> Option<&PermissionRequirement> {
        match self {
            Self::Forbidden { requirement, .. } => requirement.as_ref(),
            _ => None,
        }
    }

    /// Human-readable reason suitable for an authorizer decision
    pub fn reason(&self) -> String {
        match self {
            Self::Forbidden {
                requirement: Some(requirement),
                ..
            } => format!("missing permission: {}", requirement),
            Self::Forbidden { reason, .. } if !reason.is_empty() => reason.clone(),
            Self::Forbidden { .. } => GENERIC_DENIAL.to_string(),
            Self::Unauthorized(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
