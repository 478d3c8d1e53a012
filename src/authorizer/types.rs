//! Authorizer decision and request attribute types

use crate::auth::identity::AuthContext;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single authorization rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
    /// Defer to the next rule
    NoOpinion,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => write!(f, "allow"),
            Decision::Deny => write!(f, "deny"),
            Decision::NoOpinion => write!(f, "no_opinion"),
        }
    }
}

/// Authorization result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzResult {
    pub decision: Decision,
    /// Human-readable explanation, may be empty
    pub reason: String,
}

impl AuthzResult {
    pub fn allow<S: Into<String>>(reason: S) -> Self {
        Self {
            decision: Decision::Allow,
            reason: reason.into(),
        }
    }

    pub fn deny<S: Into<String>>(reason: S) -> Self {
        Self {
            decision: Decision::Deny,
            reason: reason.into(),
        }
    }

    pub fn no_opinion() -> Self {
        Self {
            decision: Decision::NoOpinion,
            reason: String::new(),
        }
    }

    pub fn no_opinion_because<S: Into<String>>(reason: S) -> Self {
        Self {
            decision: Decision::NoOpinion,
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.decision == Decision::Allow
    }

    /// Allow or Deny
    pub fn is_definitive(&self) -> bool {
        self.decision != Decision::NoOpinion
    }
}

/// API group and version pair used to route requests to authorizers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersion {
    pub group: String,
    pub version: String,
}

impl GroupVersion {
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.version)
    }
}

/// Attributes of the request being authorized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestAttributes {
    pub verb: String,
    #[serde(default)]
    pub api_group: String,
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub subresource: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub path: String,
}

impl RequestAttributes {
    /// Request against an API resource
    pub fn resource(
        verb: impl Into<String>,
        api_group: impl Into<String>,
        api_version: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            verb: verb.into(),
            api_group: api_group.into(),
            api_version: api_version.into(),
            resource: resource.into(),
            ..Default::default()
        }
    }

    /// Request against a plain path (discovery, health, ...)
    pub fn non_resource(verb: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_subresource(mut self, subresource: impl Into<String>) -> Self {
        self.subresource = subresource.into();
        self
    }

    pub fn is_resource_request(&self) -> bool {
        !self.resource.is_empty()
    }

    pub fn group_version(&self) -> GroupVersion {
        GroupVersion::new(self.api_group.clone(), self.api_version.clone())
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.verb.as_str(), "get" | "list" | "watch")
    }
}

/// One authorization rule
///
/// `Err` signals a system fault, never a policy refusal; refusals are
/// expressed as [`Decision::Deny`].
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult>;
}

#[async_trait]
impl<T: Authorizer + ?Sized> Authorizer for std::sync::Arc<T> {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        (**self).authorize(ctx, attrs).await
    }
}
