//! Legacy organization-role authorizer

use super::types::{Authorizer, AuthzResult, RequestAttributes};
use crate::auth::identity::{AuthContext, OrgRole};
use crate::utils::error::Result;
use async_trait::async_trait;

const READ_VERBS: &[&str] = &["get", "list", "watch"];
const WRITE_VERBS: &[&str] = &["create", "update", "patch", "delete", "deletecollection"];

/// Last rule in the chain: decides from the requester's org role alone.
///
/// Admins may do anything, editors may read and write, viewers and
/// role-less users may only read.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrgRoleAuthorizer;

impl OrgRoleAuthorizer {
    fn permits(role: OrgRole, verb: &str) -> bool {
        match role {
            OrgRole::Admin => true,
            OrgRole::Editor => READ_VERBS.contains(&verb) || WRITE_VERBS.contains(&verb),
            OrgRole::Viewer | OrgRole::None => READ_VERBS.contains(&verb),
        }
    }
}

#[async_trait]
impl Authorizer for OrgRoleAuthorizer {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        let Some(user) = ctx.requester() else {
            return Ok(AuthzResult::deny("missing requester"));
        };

        if Self::permits(user.org_role, &attrs.verb) {
            return Ok(AuthzResult::allow(""));
        }
        Ok(AuthzResult::deny(format!(
            "org role {} may not {} {}",
            user.org_role, attrs.verb, attrs.resource
        )))
    }
}
