//! Access client backed by the requester's coarse permission map

use crate::auth::checker::{AccessClient, CheckRequest, CheckResponse};
use crate::auth::identity::Identity;
use crate::utils::error::{AuthzError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

const FOLDER_KIND: &str = "folders";

/// How a resource's verbs translate into legacy actions and scopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMapping {
    /// API group the resource belongs to
    pub group: String,
    /// Plural resource name
    pub resource: String,
    /// Scope kind, e.g. `dashboards` in `dashboards:uid:abc`
    pub kind: String,
    /// Scope attribute, e.g. `uid`
    #[serde(default = "default_attribute")]
    pub attribute: String,
    /// Verb to action mapping
    pub actions: HashMap<String, String>,
}

impl ResourceMapping {
    pub fn new(group: impl Into<String>, resource: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            resource: resource.into(),
            kind: kind.into(),
            attribute: default_attribute(),
            actions: HashMap::new(),
        }
    }

    pub fn with_action(mut self, verb: impl Into<String>, action: impl Into<String>) -> Self {
        self.actions.insert(verb.into(), action.into());
        self
    }

    /// Scopes that grant access to `name`, optionally via its folder
    fn candidate_scopes(&self, name: &str, folder: &str) -> Vec<String> {
        let mut scopes = vec![
            "*".to_string(),
            format!("{}:*", self.kind),
            format!("{}:{}:*", self.kind, self.attribute),
            format!("{}:{}:{}", self.kind, self.attribute, name),
        ];
        if !folder.is_empty() {
            scopes.push(format!("{}:*", FOLDER_KIND));
            scopes.push(format!("{}:uid:*", FOLDER_KIND));
            scopes.push(format!("{}:uid:{}", FOLDER_KIND, folder));
        }
        scopes
    }
}

fn default_attribute() -> String {
    "uid".to_string()
}

/// Answers checks from legacy role-based permissions
#[derive(Debug, Clone, Default)]
pub struct LegacyAccessClient {
    mappings: HashMap<(String, String), ResourceMapping>,
}

impl LegacyAccessClient {
    pub fn new(mappings: impl IntoIterator<Item = ResourceMapping>) -> Self {
        let mappings: HashMap<_, _> = mappings
            .into_iter()
            .map(|m| ((m.group.clone(), m.resource.clone()), m))
            .collect();
        info!("Legacy access client initialized with {} resource mappings", mappings.len());
        Self { mappings }
    }

    pub fn mapping(&self, group: &str, resource: &str) -> Option<&ResourceMapping> {
        self.mappings.get(&(group.to_string(), resource.to_string()))
    }
}

#[async_trait]
impl AccessClient for LegacyAccessClient {
    async fn check(
        &self,
        identity: &Identity,
        req: &CheckRequest,
        folder: &str,
    ) -> Result<CheckResponse> {
        let Some(requester) = identity.requester() else {
            debug!(identity = %identity.typed_uid(), "legacy permissions need a session requester");
            return Ok(CheckResponse::denied());
        };

        let mapping = self.mapping(&req.group, &req.resource).ok_or_else(|| {
            AuthzError::client(format!("unknown resource {}.{}", req.resource, req.group))
        })?;

        let Some(action) = mapping.actions.get(&req.verb) else {
            debug!(verb = %req.verb, resource = %req.resource, "no legacy action for verb");
            return Ok(CheckResponse::denied());
        };

        if !requester.has_action(action) {
            return Ok(CheckResponse::denied());
        }

        // create and list carry no name; holding the action is enough
        if req.name.is_empty() {
            return Ok(CheckResponse::allowed());
        }

        let granted = requester.scopes_for(action);
        let allowed = mapping
            .candidate_scopes(&req.name, folder)
            .iter()
            .any(|scope| granted.contains(scope));

        Ok(CheckResponse { allowed })
    }
}
