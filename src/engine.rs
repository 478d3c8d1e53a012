//! Engine wiring: one access checker and one authorizer chain built from
//! configuration

use crate::auth::checker::{AccessCheck, AccessChecker, AccessClient};
use crate::auth::identity::{AuthContext, SignedInUser, TokenIdentity};
use crate::auth::legacy::LegacyAccessClient;
use crate::authorizer::resources::{ReceiverPermissions, register_resource_authorizers};
use crate::authorizer::{
    ApiGroupRegistry, Authorizer, AuthorizerChainBuilder, AuthzResult, RequestAttributes,
    UnionAuthorizer,
};
use crate::config::AuthzConfig;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Assembled authorization engine
pub struct AuthzEngine {
    checker: Arc<AccessChecker>,
    registry: Arc<ApiGroupRegistry>,
    chain: UnionAuthorizer,
}

impl AuthzEngine {
    /// Build with the legacy permission-map client described by `config`
    pub fn from_config(config: &AuthzConfig) -> Result<Self> {
        let client = Arc::new(LegacyAccessClient::new(config.legacy_resources.clone()));
        Self::with_client(config, client)
    }

    /// Build around an arbitrary access client
    pub fn with_client(config: &AuthzConfig, client: Arc<dyn AccessClient>) -> Result<Self> {
        config.validate()?;

        let checker = Arc::new(
            AccessChecker::new(client, config.checker_mode()).with_fallback(config.fallback_role),
        );

        let registry = Arc::new(ApiGroupRegistry::new());
        register_resource_authorizers(&registry, Arc::new(ReceiverPermissions))?;

        let chain = AuthorizerChainBuilder::from_config(config, registry.clone())
            .with_access_checker(&config.api_groups, checker.clone())?
            .build();
        registry.freeze();

        info!(
            "Authorization engine ready: mode={:?}, fallback={:?}, api_groups={}",
            checker.mode(),
            checker.fallback_role(),
            registry.len()
        );

        Ok(Self {
            checker,
            registry,
            chain,
        })
    }

    pub fn checker(&self) -> Arc<dyn AccessCheck> {
        self.checker.clone()
    }

    pub fn registry(&self) -> &Arc<ApiGroupRegistry> {
        &self.registry
    }

    /// Run the chain for one request
    pub async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        self.chain.authorize(ctx, attrs).await
    }
}

/// Self-contained description of one request to evaluate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub access_token: Option<TokenIdentity>,
    #[serde(default)]
    pub requester: Option<SignedInUser>,
    /// Caller deadline, relative to the start of evaluation
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    pub attributes: RequestAttributes,
}

impl EvaluationRequest {
    pub fn into_parts(self) -> (AuthContext, RequestAttributes) {
        let mut ctx = AuthContext::new();
        if let Some(token) = self.access_token {
            ctx = ctx.with_access_token(token);
        }
        if let Some(user) = self.requester {
            ctx = ctx.with_requester(user);
        }
        if let Some(ms) = self.timeout_ms {
            ctx = ctx.with_timeout(Duration::from_millis(ms));
        }
        (ctx, self.attributes)
    }
}
