//! Logs drilldown settings authorizer

use super::user_storage::owner_identifier;
use crate::auth::identity::AuthContext;
use crate::authorizer::types::{Authorizer, AuthzResult, RequestAttributes};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const LOGS_DRILLDOWN_RESOURCE: &str = "logsdrilldowns";
pub const LOGS_DRILLDOWN_DEFAULTS_RESOURCE: &str = "logsdrilldowndefaults";
pub const ACTION_DEFAULTS_WRITE: &str = "logs-drilldown.defaults:write";

/// Per-user drilldown settings are owned by their user; org-wide defaults
/// are readable by everyone and writable with a dedicated permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogsDrilldownAuthorizer;

#[async_trait]
impl Authorizer for LogsDrilldownAuthorizer {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        match attrs.resource.as_str() {
            LOGS_DRILLDOWN_RESOURCE | LOGS_DRILLDOWN_DEFAULTS_RESOURCE => {}
            _ => return Ok(AuthzResult::no_opinion()),
        }
        let Some(user) = ctx.requester() else {
            return Ok(AuthzResult::deny("valid user is required"));
        };

        if attrs.resource == LOGS_DRILLDOWN_DEFAULTS_RESOURCE {
            if attrs.is_read_only() || user.has_action(ACTION_DEFAULTS_WRITE) {
                return Ok(AuthzResult::allow(""));
            }
            return Ok(AuthzResult::deny(format!(
                "missing permission: {}",
                ACTION_DEFAULTS_WRITE
            )));
        }

        if user.is_grafana_admin {
            return Ok(AuthzResult::allow(""));
        }
        if attrs.verb == "create" || attrs.name.is_empty() {
            return Ok(AuthzResult::no_opinion());
        }
        if owner_identifier(user) == Some(attrs.name.as_str()) {
            Ok(AuthzResult::allow(""))
        } else {
            Ok(AuthzResult::deny("logs drilldown settings belong to another user"))
        }
    }
}
