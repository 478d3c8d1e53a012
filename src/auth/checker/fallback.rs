//! Legacy role fallback shared by every checker mode

use super::types::{CheckRequest, CheckResponse};
use crate::auth::identity::{Identity, OrgRole};
use crate::utils::error::{AuthzError, Result};
use tracing::debug;

/// Turn a client answer into the checker's result, letting the fallback role
/// rescue a denial. Client errors are treated exactly like `allowed: false`.
pub(super) fn resolve_outcome(
    identity: &Identity,
    req: &CheckRequest,
    outcome: Result<CheckResponse>,
    fallback: Option<OrgRole>,
) -> Result<()> {
    if let Ok(CheckResponse { allowed: true }) = outcome {
        return Ok(());
    }

    if let (Some(required), Some(requester)) = (fallback, identity.requester()) {
        if requester.org_role.includes(required) {
            debug!(
                identity = %identity.typed_uid(),
                role = %requester.org_role,
                fallback = %required,
                verb = %req.verb,
                resource = %req.resource,
                "fallback role granted access"
            );
            return Ok(());
        }
    }

    Err(denial(req, outcome))
}

fn denial(req: &CheckRequest, outcome: Result<CheckResponse>) -> AuthzError {
    match outcome {
        Ok(_) => AuthzError::forbidden(format!(
            "permission denied: cannot {} {}.{}",
            req.verb, req.resource, req.group
        )),
        Err(err) if err.is_forbidden() => err,
        Err(err) => AuthzError::forbidden(format!("permission denied: access check failed: {}", err)),
    }
}
