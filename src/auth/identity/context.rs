//! Request-scoped authentication context
//!
//! The transport layer populates this once per request; authorization code
//! only ever reads from it.

use super::namespace::namespace_for_org;
use super::user::{SignedInUser, TokenIdentity};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// Identity sources and caller deadline for a single request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Correlation id for logs
    pub request_id: Uuid,
    access_token: Option<Arc<TokenIdentity>>,
    requester: Option<Arc<SignedInUser>>,
    deadline: Option<Instant>,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthContext {
    /// Context with no identity attached
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            access_token: None,
            requester: None,
            deadline: None,
        }
    }

    /// Attach the identity from a verified access token
    pub fn with_access_token(mut self, token: TokenIdentity) -> Self {
        self.access_token = Some(Arc::new(token));
        self
    }

    /// Attach the session-bound requester
    pub fn with_requester(mut self, mut user: SignedInUser) -> Self {
        if user.namespace.is_empty() {
            user.namespace = namespace_for_org(user.org_id);
        }
        self.requester = Some(Arc::new(user));
        self
    }

    /// Caller deadline for remote calls made on behalf of this request
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn access_token(&self) -> Option<&Arc<TokenIdentity>> {
        self.access_token.as_ref()
    }

    pub fn requester(&self) -> Option<&Arc<SignedInUser>> {
        self.requester.as_ref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
