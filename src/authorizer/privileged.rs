//! Privileged-group bypass

use super::types::{Authorizer, AuthzResult, RequestAttributes};
use crate::auth::identity::AuthContext;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Group carried by cluster-admin tooling
pub const SYSTEM_PRIVILEGED_GROUP: &str = "system:masters";

/// Skips the wrapped scoping rule for members of a privileged group.
///
/// Members get NoOpinion so the per-API-group and role rules still decide;
/// everyone else is evaluated by `inner`.
#[derive(Debug, Clone)]
pub struct PrivilegedGroupBypass<A> {
    groups: Vec<String>,
    inner: A,
}

impl<A> PrivilegedGroupBypass<A> {
    pub fn new(groups: Vec<String>, inner: A) -> Self {
        Self { groups, inner }
    }

    fn is_privileged(&self, ctx: &AuthContext) -> bool {
        ctx.requester()
            .is_some_and(|user| user.in_any_group(&self.groups))
    }
}

#[async_trait]
impl<A: Authorizer> Authorizer for PrivilegedGroupBypass<A> {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        if self.is_privileged(ctx) {
            return Ok(AuthzResult::no_opinion_because(
                "privileged group bypasses namespace scoping",
            ));
        }
        self.inner.authorize(ctx, attrs).await
    }
}
