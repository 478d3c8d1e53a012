//! Tenant namespace parsing
//!
//! Namespaces encode the tenant a request targets: `default` is org 1,
//! `org-<n>` is org n and `stacks-<n>` is a cloud stack (always org 1).

use crate::utils::error::{AuthzError, Result};

const DEFAULT_NAMESPACE: &str = "default";
const ORG_PREFIX: &str = "org-";
const STACK_PREFIX: &str = "stacks-";

/// Parsed form of a namespace string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceInfo {
    /// Original namespace value; empty for cluster-scoped requests
    pub value: String,
    /// Organization the namespace maps to, 0 when cluster scoped
    pub org_id: i64,
    /// Cloud stack id, 0 when not a stack namespace
    pub stack_id: i64,
}

impl NamespaceInfo {
    pub fn parse(namespace: &str) -> Result<Self> {
        let mut info = Self {
            value: namespace.to_string(),
            org_id: 0,
            stack_id: 0,
        };

        if namespace.is_empty() {
            return Ok(info);
        }

        if namespace == DEFAULT_NAMESPACE {
            info.org_id = 1;
            return Ok(info);
        }

        if let Some(raw) = namespace.strip_prefix(ORG_PREFIX) {
            let org_id: i64 = raw
                .parse()
                .map_err(|_| invalid(namespace, "invalid org id"))?;
            if org_id < 1 {
                return Err(invalid(namespace, "org id must be positive"));
            }
            if org_id == 1 {
                return Err(invalid(namespace, "use default rather than org-1"));
            }
            info.org_id = org_id;
            return Ok(info);
        }

        if let Some(raw) = namespace.strip_prefix(STACK_PREFIX) {
            let stack_id: i64 = raw
                .parse()
                .map_err(|_| invalid(namespace, "invalid stack id"))?;
            if stack_id < 1 {
                return Err(invalid(namespace, "stack id must be positive"));
            }
            info.stack_id = stack_id;
            info.org_id = 1;
            return Ok(info);
        }

        Err(invalid(namespace, "unrecognized namespace format"))
    }

    /// Cluster-scoped requests carry no namespace
    pub fn is_cluster_scoped(&self) -> bool {
        self.value.is_empty()
    }
}

/// Namespace string for an organization id
pub fn namespace_for_org(org_id: i64) -> String {
    if org_id == 1 {
        DEFAULT_NAMESPACE.to_string()
    } else {
        format!("{}{}", ORG_PREFIX, org_id)
    }
}

/// Namespace string for a cloud stack id
pub fn namespace_for_stack(stack_id: i64) -> String {
    format!("{}{}", STACK_PREFIX, stack_id)
}

fn invalid(namespace: &str, why: &str) -> AuthzError {
    AuthzError::config(format!("invalid namespace {:?}: {}", namespace, why))
}
