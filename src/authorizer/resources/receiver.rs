//! Alert receiver authorizer

use crate::auth::identity::{AuthContext, SignedInUser};
use crate::authorizer::types::{Authorizer, AuthzResult, RequestAttributes};
use crate::utils::error::{AuthzError, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub const RECEIVER_RESOURCE: &str = "receivers";

const ACTION_NOTIFICATIONS_READ: &str = "alert.notifications:read";
const ACTION_NOTIFICATIONS_WRITE: &str = "alert.notifications:write";
const ACTION_RECEIVERS_READ: &str = "alert.notifications.receivers:read";
const ACTION_RECEIVERS_CREATE: &str = "alert.notifications.receivers:create";
const ACTION_RECEIVERS_WRITE: &str = "alert.notifications.receivers:write";
const ACTION_RECEIVERS_DELETE: &str = "alert.notifications.receivers:delete";

/// Per-verb authorization capability for receivers
///
/// A refusal must be a forbidden error; anything else is treated as a
/// system fault by [`ReceiverAuthorizer`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReceiverAccess: Send + Sync {
    async fn authorize_read_by_uid(&self, user: &SignedInUser, uid: &str) -> Result<()>;
    async fn authorize_create(&self, user: &SignedInUser) -> Result<()>;
    async fn authorize_update_by_uid(&self, user: &SignedInUser, uid: &str) -> Result<()>;
    async fn authorize_delete_by_uid(&self, user: &SignedInUser, uid: &str) -> Result<()>;
}

/// Maps each receiver verb onto one [`ReceiverAccess`] call
pub struct ReceiverAuthorizer {
    access: Arc<dyn ReceiverAccess>,
}

impl ReceiverAuthorizer {
    pub fn new(access: Arc<dyn ReceiverAccess>) -> Self {
        Self { access }
    }
}

#[async_trait]
impl Authorizer for ReceiverAuthorizer {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        if attrs.resource != RECEIVER_RESOURCE {
            return Ok(AuthzResult::no_opinion());
        }
        let Some(user) = ctx.requester() else {
            return Ok(AuthzResult::deny("valid user is required"));
        };

        let outcome = match attrs.verb.as_str() {
            "get" => self.access.authorize_read_by_uid(user, &attrs.name).await,
            "create" => self.access.authorize_create(user).await,
            "update" | "patch" => self.access.authorize_update_by_uid(user, &attrs.name).await,
            "delete" | "deletecollection" => {
                self.access.authorize_delete_by_uid(user, &attrs.name).await
            }
            // Results are filtered per item downstream
            "list" => return Ok(AuthzResult::allow("")),
            _ => return Ok(AuthzResult::no_opinion()),
        };

        match outcome {
            Ok(()) => Ok(AuthzResult::allow("")),
            Err(err) if err.is_forbidden() => Ok(AuthzResult::deny(err.reason())),
            Err(err) => Err(err),
        }
    }
}

/// [`ReceiverAccess`] evaluated against the requester's permission map
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiverPermissions;

impl ReceiverPermissions {
    fn scope(uid: &str) -> String {
        format!("receivers:uid:{}", uid)
    }

    fn holds_scoped(user: &SignedInUser, action: &str, uid: &str) -> bool {
        let exact = Self::scope(uid);
        user.scopes_for(action)
            .iter()
            .any(|s| s == "*" || s == "receivers:*" || s == "receivers:uid:*" || *s == exact)
    }

    fn require(
        user: &SignedInUser,
        legacy_action: &str,
        action: &str,
        uid: Option<&str>,
    ) -> Result<()> {
        if user.has_action(legacy_action) {
            return Ok(());
        }
        let granted = match uid {
            Some(uid) => Self::holds_scoped(user, action, uid),
            None => user.has_action(action),
        };
        if granted {
            return Ok(());
        }
        Err(AuthzError::missing_permission(action, uid.map(Self::scope)))
    }
}

#[async_trait]
impl ReceiverAccess for ReceiverPermissions {
    async fn authorize_read_by_uid(&self, user: &SignedInUser, uid: &str) -> Result<()> {
        Self::require(user, ACTION_NOTIFICATIONS_READ, ACTION_RECEIVERS_READ, Some(uid))
    }

    async fn authorize_create(&self, user: &SignedInUser) -> Result<()> {
        Self::require(user, ACTION_NOTIFICATIONS_WRITE, ACTION_RECEIVERS_CREATE, None)
    }

    async fn authorize_update_by_uid(&self, user: &SignedInUser, uid: &str) -> Result<()> {
        Self::require(user, ACTION_NOTIFICATIONS_WRITE, ACTION_RECEIVERS_WRITE, Some(uid))
    }

    async fn authorize_delete_by_uid(&self, user: &SignedInUser, uid: &str) -> Result<()> {
        Self::require(user, ACTION_NOTIFICATIONS_WRITE, ACTION_RECEIVERS_DELETE, Some(uid))
    }
}
