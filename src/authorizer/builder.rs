//! Authorizer chain assembly

use super::impersonation::ImpersonationAuthorizer;
use super::namespace::NamespaceAuthorizer;
use super::org_role::OrgRoleAuthorizer;
use super::privileged::{PrivilegedGroupBypass, SYSTEM_PRIVILEGED_GROUP};
use super::registry::ApiGroupRegistry;
use super::resource::ResourceAuthorizer;
use super::types::GroupVersion;
use super::union::UnionAuthorizer;
use crate::auth::checker::AccessCheck;
use crate::config::AuthzConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Builds the request authorizer chain.
///
/// Rule order is fixed: impersonation block, privileged-group bypass around
/// namespace scoping, the per-API-group registry, then the org-role rule.
#[derive(Debug)]
pub struct AuthorizerChainBuilder {
    privileged_groups: Vec<String>,
    stack_id: Option<i64>,
    registry: Arc<ApiGroupRegistry>,
}

impl AuthorizerChainBuilder {
    pub fn new(registry: Arc<ApiGroupRegistry>) -> Self {
        Self {
            privileged_groups: vec![SYSTEM_PRIVILEGED_GROUP.to_string()],
            stack_id: None,
            registry,
        }
    }

    pub fn from_config(config: &AuthzConfig, registry: Arc<ApiGroupRegistry>) -> Self {
        Self::new(registry)
            .privileged_groups(config.privileged_groups.clone())
            .stack_id(config.stack_id)
    }

    pub fn privileged_groups(mut self, groups: Vec<String>) -> Self {
        self.privileged_groups = groups;
        self
    }

    pub fn stack_id(mut self, stack_id: Option<i64>) -> Self {
        self.stack_id = stack_id;
        self
    }

    /// Route the given group/versions through `checker`
    pub fn with_access_checker(
        self,
        groups: &[GroupVersion],
        checker: Arc<dyn AccessCheck>,
    ) -> Result<Self> {
        let authorizer = Arc::new(ResourceAuthorizer::new(checker));
        for gv in groups {
            self.registry
                .register(gv.group.clone(), gv.version.clone(), authorizer.clone())?;
        }
        Ok(self)
    }

    pub fn registry(&self) -> &Arc<ApiGroupRegistry> {
        &self.registry
    }

    pub fn build(self) -> UnionAuthorizer {
        info!(
            "Building authorizer chain with {} registered API groups",
            self.registry.len()
        );

        let scoping = PrivilegedGroupBypass::new(
            self.privileged_groups,
            NamespaceAuthorizer::new(self.stack_id),
        );

        UnionAuthorizer::new()
            .with_rule("impersonation", Arc::new(ImpersonationAuthorizer))
            .with_rule("namespace", Arc::new(scoping))
            .with_rule("api_group", self.registry)
            .with_rule("org_role", Arc::new(OrgRoleAuthorizer))
    }
}
