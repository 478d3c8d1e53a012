//! Resolved principals: token identities, session requesters and the unified `Identity`

use super::namespace::namespace_for_org;
use super::types::{IdentityType, OrgRole};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Identity carried by a verified access token (service-to-service calls)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIdentity {
    /// Principal kind
    pub identity_type: IdentityType,
    /// Bare identifier, without the type prefix
    pub uid: String,
    /// Tenant namespace the token was issued for
    pub namespace: String,
}

impl TokenIdentity {
    pub fn new(identity_type: IdentityType, uid: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            identity_type,
            uid: uid.into(),
            namespace: namespace.into(),
        }
    }
}

/// Session-bound requester (interactive, single-tenant calls)
///
/// Only a requester carries legacy role information, so fallback role
/// evaluation is only possible for identities that resolve to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedInUser {
    /// Principal kind
    pub identity_type: IdentityType,
    /// Bare identifier, without the type prefix
    pub uid: String,
    /// Login name
    #[serde(default)]
    pub login: String,
    /// Organization the session is bound to
    pub org_id: i64,
    /// Tenant namespace, derived from `org_id` unless set explicitly
    #[serde(default)]
    pub namespace: String,
    /// Role in the current organization
    #[serde(default)]
    pub org_role: OrgRole,
    /// Server-wide administrator
    #[serde(default)]
    pub is_grafana_admin: bool,
    /// Group memberships
    #[serde(default)]
    pub groups: Vec<String>,
    /// Coarse permission map: action to the scopes it is granted on
    #[serde(default)]
    pub permissions: HashMap<String, Vec<String>>,
}

impl SignedInUser {
    /// Create a requester in the given organization with no role
    pub fn new(identity_type: IdentityType, uid: impl Into<String>, org_id: i64) -> Self {
        Self {
            identity_type,
            uid: uid.into(),
            login: String::new(),
            org_id,
            namespace: namespace_for_org(org_id),
            org_role: OrgRole::None,
            is_grafana_admin: false,
            groups: Vec::new(),
            permissions: HashMap::new(),
        }
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = login.into();
        self
    }

    pub fn with_role(mut self, role: OrgRole) -> Self {
        self.org_role = role;
        self
    }

    pub fn with_grafana_admin(mut self, is_admin: bool) -> Self {
        self.is_grafana_admin = is_admin;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn with_permission(mut self, action: impl Into<String>, scope: impl Into<String>) -> Self {
        self.permissions
            .entry(action.into())
            .or_default()
            .push(scope.into());
        self
    }

    /// Whether the requester holds `action` at all, regardless of scope
    pub fn has_action(&self, action: &str) -> bool {
        self.permissions.contains_key(action)
    }

    /// Scopes granted for an action
    pub fn scopes_for(&self, action: &str) -> &[String] {
        self.permissions
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn in_any_group(&self, groups: &[String]) -> bool {
        self.groups.iter().any(|g| groups.contains(g))
    }
}

/// The resolved principal making a request
#[derive(Debug, Clone)]
pub enum Identity {
    /// Resolved from a verified access token
    AccessToken(Arc<TokenIdentity>),
    /// Resolved from the session requester
    Session(Arc<SignedInUser>),
}

impl Identity {
    pub fn identity_type(&self) -> IdentityType {
        match self {
            Identity::AccessToken(token) => token.identity_type,
            Identity::Session(user) => user.identity_type,
        }
    }

    /// Bare identifier, e.g. `abc` for `user:abc`
    pub fn identifier(&self) -> &str {
        match self {
            Identity::AccessToken(token) => &token.uid,
            Identity::Session(user) => &user.uid,
        }
    }

    /// Identifier with its type prefix, e.g. `user:abc`
    pub fn typed_uid(&self) -> String {
        format!("{}:{}", self.identity_type(), self.identifier())
    }

    pub fn namespace(&self) -> &str {
        match self {
            Identity::AccessToken(token) => &token.namespace,
            Identity::Session(user) => &user.namespace,
        }
    }

    pub fn is_access_policy(&self) -> bool {
        self.identity_type() == IdentityType::AccessPolicy
    }

    /// Requester capability, only available for session identities
    pub fn requester(&self) -> Option<&SignedInUser> {
        match self {
            Identity::AccessToken(_) => None,
            Identity::Session(user) => Some(user),
        }
    }
}

impl From<TokenIdentity> for Identity {
    fn from(token: TokenIdentity) -> Self {
        Identity::AccessToken(Arc::new(token))
    }
}

impl From<SignedInUser> for Identity {
    fn from(user: SignedInUser) -> Self {
        Identity::Session(Arc::new(user))
    }
}
