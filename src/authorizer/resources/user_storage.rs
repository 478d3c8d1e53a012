//! Personal storage authorizer

use crate::auth::identity::{AuthContext, IdentityType, SignedInUser};
use crate::authorizer::types::{Authorizer, AuthzResult, RequestAttributes};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const USER_STORAGE_RESOURCE: &str = "user-storage";

/// Compare an object name of the form `<service>:<user id>` against the
/// caller's own identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserStorageAuthorizer;

/// Identifier a user's own objects are keyed by
///
/// Only `User` identities own objects.
pub(crate) fn owner_identifier(user: &SignedInUser) -> Option<&str> {
    match user.identity_type {
        IdentityType::User => Some(user.uid.as_str()),
        _ => None,
    }
}

#[async_trait]
impl Authorizer for UserStorageAuthorizer {
    async fn authorize(&self, ctx: &AuthContext, attrs: &RequestAttributes) -> Result<AuthzResult> {
        if attrs.resource != USER_STORAGE_RESOURCE {
            return Ok(AuthzResult::no_opinion());
        }
        let Some(user) = ctx.requester() else {
            return Ok(AuthzResult::deny("valid user is required"));
        };

        if user.is_grafana_admin {
            return Ok(AuthzResult::allow(""));
        }
        // The name is checked again when the object is written
        if attrs.verb == "create" || attrs.name.is_empty() {
            return Ok(AuthzResult::no_opinion());
        }

        let mut parts = attrs.name.split(':');
        let (Some(_service), Some(id), None) = (parts.next(), parts.next(), parts.next()) else {
            return Ok(AuthzResult::deny(format!(
                "invalid user storage name {}: expected <service>:<user id>",
                attrs.name
            )));
        };

        if owner_identifier(user) == Some(id) {
            Ok(AuthzResult::allow(""))
        } else {
            Ok(AuthzResult::deny("you can only access your own storage"))
        }
    }
}
