//! Namespace / organization scoping

use super::types::{Authorizer, AuthzResult, RequestAttributes};
use crate::auth::identity::{AuthContext, IdentityType, NamespaceInfo};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Denies requests that target a namespace outside the caller's tenant.
///
/// Never allows: a matching tenant only means later rules get to decide.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceAuthorizer {
    stack_id: Option<i64>,
}

impl NamespaceAuthorizer {
    pub fn new(stack_id: Option<i64>) -> Self {
        Self { stack_id }
    }

    fn check_stack(&self, info: &NamespaceInfo) -> Option<AuthzResult> {
        if info.stack_id == 0 {
            return None;
        }
        match self.stack_id {
            Some(expected) if expected == info.stack_id => None,
            Some(expected) => Some(AuthzResult::deny(format!(
                "namespace {} does not belong to stack {}",
                info.value, expected
            ))),
            None => Some(AuthzResult::deny(format!(
                "stack namespace {} is not served here",
                info.value
            ))),
        }
    }
}

#[async_trait]
impl Authorizer for NamespaceAuthorizer {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        if attrs.namespace.is_empty() {
            return Ok(AuthzResult::no_opinion());
        }

        let info = match NamespaceInfo::parse(&attrs.namespace) {
            Ok(info) => info,
            Err(err) => {
                return Ok(AuthzResult::deny(format!(
                    "error reading namespace: {}",
                    err.reason()
                )));
            }
        };

        if let Some(user) = ctx.requester() {
            if user.is_grafana_admin || user.identity_type == IdentityType::Anonymous {
                return Ok(AuthzResult::no_opinion());
            }
            if let Some(denied) = self.check_stack(&info) {
                return Ok(denied);
            }
            if user.org_id != info.org_id {
                return Ok(AuthzResult::deny(format!(
                    "org mismatch: requester belongs to org {} but namespace {} is org {}",
                    user.org_id, info.value, info.org_id
                )));
            }
            return Ok(AuthzResult::no_opinion());
        }

        if let Some(token) = ctx.access_token() {
            if token.identity_type == IdentityType::AccessPolicy {
                return Ok(AuthzResult::no_opinion());
            }
            if token.namespace != info.value {
                return Ok(AuthzResult::deny(format!(
                    "namespace mismatch: token issued for {} but request targets {}",
                    token.namespace, info.value
                )));
            }
            return Ok(AuthzResult::no_opinion());
        }

        Ok(AuthzResult::deny("no identity found for namespaced request"))
    }
}
