//! Access check request/response types

use serde::{Deserialize, Serialize};

/// The question posed to the permission check client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// get, list, watch, create, update, patch, delete, ...
    pub verb: String,
    /// API group
    pub group: String,
    /// Plural resource kind
    pub resource: String,
    /// Tenant namespace; filled from the identity when empty
    #[serde(default)]
    pub namespace: String,
    /// Object name, empty for create and list
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subresource: String,
}

impl CheckRequest {
    pub fn new(verb: impl Into<String>, group: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            group: group.into(),
            resource: resource.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_subresource(mut self, subresource: impl Into<String>) -> Self {
        self.subresource = subresource.into();
        self
    }
}

/// Answer from the permission check client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub allowed: bool,
}

impl CheckResponse {
    pub fn allowed() -> Self {
        Self { allowed: true }
    }

    pub fn denied() -> Self {
        Self { allowed: false }
    }
}

/// Where an [`AccessChecker`](super::AccessChecker) takes its identity from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerMode {
    /// Multi-tenant: only a verified access token is accepted; fallback
    /// roles never apply.
    AccessToken,
    /// Single-tenant: only the session requester is accepted.
    Session,
    /// Prefer the access token when it belongs to an access policy (or when
    /// the access checker is trusted exclusively), otherwise use the session
    /// requester.
    Unified {
        use_exclusively_access_checker: bool,
    },
}

impl CheckerMode {
    /// Whether a configured fallback role may rescue a denial in this mode
    pub fn fallback_applies(&self) -> bool {
        match self {
            CheckerMode::AccessToken => false,
            CheckerMode::Session => true,
            CheckerMode::Unified {
                use_exclusively_access_checker,
            } => !use_exclusively_access_checker,
        }
    }
}
