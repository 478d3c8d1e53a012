//! Access checker: identity resolution, permission check and fallback

use super::client::AccessClient;
use super::fallback::resolve_outcome;
use super::types::{CheckRequest, CheckerMode};
use crate::auth::identity::{AuthContext, Identity, IdentityType, OrgRole};
use crate::utils::error::{AuthzError, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answers "may the caller do X" for one request
#[async_trait]
pub trait AccessCheck: Send + Sync {
    /// `Ok(())` when allowed, `Unauthorized` when no identity could be
    /// resolved, `Forbidden` when the check and any fallback refused.
    async fn check(&self, ctx: &AuthContext, req: CheckRequest, folder: &str) -> Result<()>;
}

/// Access checker for one (mode, fallback role) configuration.
///
/// Cheap to clone; [`with_fallback`](Self::with_fallback) derives a new
/// checker and leaves the original untouched.
#[derive(Clone)]
pub struct AccessChecker {
    client: Arc<dyn AccessClient>,
    mode: CheckerMode,
    fallback_role: Option<OrgRole>,
}

impl fmt::Debug for AccessChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessChecker")
            .field("mode", &self.mode)
            .field("fallback_role", &self.fallback_role)
            .finish_non_exhaustive()
    }
}

impl AccessChecker {
    /// Create a checker with no fallback role
    pub fn new(client: Arc<dyn AccessClient>, mode: CheckerMode) -> Self {
        info!("Creating access checker in {:?} mode", mode);
        Self {
            client,
            mode,
            fallback_role: None,
        }
    }

    /// Multi-tenant checker that only trusts access tokens
    pub fn access_token(client: Arc<dyn AccessClient>) -> Self {
        Self::new(client, CheckerMode::AccessToken)
    }

    /// Single-tenant checker that only trusts the session requester
    pub fn session(client: Arc<dyn AccessClient>) -> Self {
        Self::new(client, CheckerMode::Session)
    }

    /// Checker that prefers tokens and falls through to the session
    pub fn unified(client: Arc<dyn AccessClient>, use_exclusively_access_checker: bool) -> Self {
        Self::new(
            client,
            CheckerMode::Unified {
                use_exclusively_access_checker,
            },
        )
    }

    /// Derive a checker carrying `role` as its fallback. `None` clears it.
    pub fn with_fallback(&self, role: impl Into<Option<OrgRole>>) -> Self {
        Self {
            client: Arc::clone(&self.client),
            mode: self.mode,
            fallback_role: role.into(),
        }
    }

    pub fn mode(&self) -> CheckerMode {
        self.mode
    }

    pub fn fallback_role(&self) -> Option<OrgRole> {
        self.fallback_role
    }

    fn resolve_identity(&self, ctx: &AuthContext) -> Result<Identity> {
        match self.mode {
            CheckerMode::AccessToken => ctx
                .access_token()
                .map(|token| Identity::AccessToken(Arc::clone(token)))
                .ok_or_else(|| AuthzError::unauthorized("no access token found in request")),
            CheckerMode::Session => ctx
                .requester()
                .map(|user| Identity::Session(Arc::clone(user)))
                .ok_or_else(|| AuthzError::unauthorized("no requester found in request")),
            CheckerMode::Unified {
                use_exclusively_access_checker,
            } => {
                if let Some(token) = ctx.access_token() {
                    if token.identity_type == IdentityType::AccessPolicy
                        || use_exclusively_access_checker
                    {
                        return Ok(Identity::AccessToken(Arc::clone(token)));
                    }
                }
                ctx.requester()
                    .map(|user| Identity::Session(Arc::clone(user)))
                    .ok_or_else(|| {
                        AuthzError::unauthorized("no access token or requester found in request")
                    })
            }
        }
    }
}

#[async_trait]
impl AccessCheck for AccessChecker {
    async fn check(&self, ctx: &AuthContext, mut req: CheckRequest, folder: &str) -> Result<()> {
        let identity = self.resolve_identity(ctx)?;

        if identity.is_access_policy() {
            debug!(
                request_id = %ctx.request_id,
                identity = %identity.typed_uid(),
                "access policy identity bypasses access check"
            );
            return Ok(());
        }

        if req.namespace.is_empty() {
            req.namespace = identity.namespace().to_string();
        }

        let call = self.client.check(&identity, &req, folder);
        let outcome = match ctx.deadline() {
            Some(deadline) => match tokio::time::timeout_at(deadline, call).await {
                Ok(outcome) => outcome,
                Err(_) => Err(AuthzError::timeout(
                    "deadline exceeded waiting for access client",
                )),
            },
            None => call.await,
        };

        if let Err(err) = &outcome {
            warn!(
                request_id = %ctx.request_id,
                identity = %identity.typed_uid(),
                verb = %req.verb,
                resource = %req.resource,
                "access client check failed: {}",
                err
            );
        }

        let fallback = self
            .fallback_role
            .filter(|_| self.mode.fallback_applies());
        let result = resolve_outcome(&identity, &req, outcome, fallback);

        debug!(
            request_id = %ctx.request_id,
            identity = %identity.typed_uid(),
            verb = %req.verb,
            group = %req.group,
            resource = %req.resource,
            namespace = %req.namespace,
            allowed = result.is_ok(),
            "access check completed"
        );
        result
    }
}
