//! Impersonation block

use super::types::{Authorizer, AuthzResult, RequestAttributes};
use crate::auth::identity::AuthContext;
use crate::utils::error::Result;
use async_trait::async_trait;

const IMPERSONATE_VERB: &str = "impersonate";

/// Denies every impersonation request, for every identity
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpersonationAuthorizer;

#[async_trait]
impl Authorizer for ImpersonationAuthorizer {
    async fn authorize(&self, _ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        if attrs.verb == IMPERSONATE_VERB {
            return Ok(AuthzResult::deny("impersonation is not supported"));
        }
        Ok(AuthzResult::no_opinion())
    }
}
