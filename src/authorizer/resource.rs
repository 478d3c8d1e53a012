//! Access-checker backed authorizer for one API group

use super::types::{Authorizer, AuthzResult, RequestAttributes};
use crate::auth::checker::{AccessCheck, CheckRequest};
use crate::auth::identity::AuthContext;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Adapts an [`AccessCheck`] to the [`Authorizer`] contract.
///
/// A refusal from the checker becomes Deny with its reason; any other
/// checker error is a system fault and is returned as-is.
#[derive(Clone)]
pub struct ResourceAuthorizer {
    checker: Arc<dyn AccessCheck>,
}

impl ResourceAuthorizer {
    pub fn new(checker: Arc<dyn AccessCheck>) -> Self {
        Self { checker }
    }
}

#[async_trait]
impl Authorizer for ResourceAuthorizer {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        if !attrs.is_resource_request() {
            return Ok(AuthzResult::no_opinion());
        }

        let req = CheckRequest::new(&attrs.verb, &attrs.api_group, &attrs.resource)
            .with_namespace(&attrs.namespace)
            .with_name(&attrs.name)
            .with_subresource(&attrs.subresource);

        match self.checker.check(ctx, req, "").await {
            Ok(()) => Ok(AuthzResult::allow("")),
            Err(err) if err.is_forbidden() || err.is_unauthorized() => {
                Ok(AuthzResult::deny(err.reason()))
            }
            Err(err) => Err(err),
        }
    }
}
