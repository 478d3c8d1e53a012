//! Identity resolution
//!
//! Principals arrive either as a verified access token (multi-tenant mode) or
//! as a session requester (single-tenant mode). Both resolve to [`Identity`].

mod context;
mod namespace;
mod types;
mod user;

pub use context::AuthContext;
pub use namespace::{NamespaceInfo, namespace_for_org, namespace_for_stack};
pub(crate) use types::deserialize_fallback_role;
pub use types::{IdentityType, OrgRole, parse_fallback_role, parse_typed_id};
pub use user::{Identity, SignedInUser, TokenIdentity};
