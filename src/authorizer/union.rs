//! Ordered union of authorizers

use super::types::{Authorizer, AuthzResult, RequestAttributes};
use crate::auth::identity::AuthContext;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Runs rules left to right and returns the first Allow or Deny.
///
/// Rules are never evaluated concurrently: an early Deny must not race a
/// later Allow. A rule error aborts the chain. When every rule abstains the
/// result is NoOpinion carrying the collected reasons; the transport layer
/// treats that as a denial.
#[derive(Clone, Default)]
pub struct UnionAuthorizer {
    rules: Vec<(&'static str, Arc<dyn Authorizer>)>,
}

impl UnionAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named rule; order of calls is evaluation order
    pub fn with_rule(mut self, name: &'static str, rule: Arc<dyn Authorizer>) -> Self {
        self.rules.push((name, rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|(name, _)| *name).collect()
    }
}

#[async_trait]
impl Authorizer for UnionAuthorizer {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        let mut reasons = Vec::new();

        for (name, rule) in &self.rules {
            let result = rule.authorize(ctx, attrs).await?;
            debug!(
                request_id = %ctx.request_id,
                rule = name,
                verb = %attrs.verb,
                resource = %attrs.resource,
                decision = %result.decision,
                reason = %result.reason,
                "authorizer rule evaluated"
            );

            if result.is_definitive() {
                return Ok(result);
            }
            if !result.reason.is_empty() {
                reasons.push(result.reason);
            }
        }

        Ok(AuthzResult::no_opinion_because(reasons.join("; ")))
    }
}
