//! Per-API-group authorizer registry

use super::types::{Authorizer, AuthzResult, GroupVersion, RequestAttributes};
use crate::auth::identity::AuthContext;
use crate::utils::error::{AuthzError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Routes resource requests to the authorizer registered for their
/// group/version.
///
/// Registration happens during startup; [`ApiGroupRegistry::freeze`] seals
/// the table before traffic is served. Unregistered group/versions and
/// non-resource requests get NoOpinion.
#[derive(Default)]
pub struct ApiGroupRegistry {
    authorizers: RwLock<HashMap<GroupVersion, Arc<dyn Authorizer>>>,
    frozen: AtomicBool,
}

impl ApiGroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the authorizer for a group/version, replacing any previous one
    pub fn register(
        &self,
        group: impl Into<String>,
        version: impl Into<String>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Result<()> {
        let key = GroupVersion::new(group, version);
        if self.is_frozen() {
            return Err(AuthzError::config(format!(
                "cannot register authorizer for {} after the registry was frozen",
                key
            )));
        }

        let mut authorizers = self.authorizers.write();
        if authorizers.insert(key.clone(), authorizer).is_some() {
            warn!("Replacing authorizer already registered for {}", key);
        } else {
            info!("Registered authorizer for {}", key);
        }
        Ok(())
    }

    /// Reject further registrations
    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    pub fn contains(&self, group: &str, version: &str) -> bool {
        self.authorizers
            .read()
            .contains_key(&GroupVersion::new(group, version))
    }

    pub fn len(&self) -> usize {
        self.authorizers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.authorizers.read().is_empty()
    }

    fn lookup(&self, key: &GroupVersion) -> Option<Arc<dyn Authorizer>> {
        self.authorizers.read().get(key).cloned()
    }
}

impl std::fmt::Debug for ApiGroupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self
            .authorizers
            .read()
            .keys()
            .map(ToString::to_string)
            .collect();
        keys.sort();
        f.debug_struct("ApiGroupRegistry")
            .field("group_versions", &keys)
            .field("frozen", &self.is_frozen())
            .finish()
    }
}

#[async_trait]
impl Authorizer for ApiGroupRegistry {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        if !attrs.is_resource_request() {
            return Ok(AuthzResult::no_opinion());
        }

        let key = attrs.group_version();
        let Some(authorizer) = self.lookup(&key) else {
            debug!("No authorizer registered for {}", key);
            return Ok(AuthzResult::no_opinion());
        };

        authorizer.authorize(ctx, attrs).await
    }
}
