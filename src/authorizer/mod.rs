//! Request authorization chain
//!
//! Ordered rules that each return Allow, Deny or NoOpinion for a request,
//! plus the authorizers for individual resource kinds that plug into the
//! per-API-group registry.

pub mod builder;
pub mod impersonation;
pub mod namespace;
pub mod org_role;
pub mod privileged;
pub mod registry;
pub mod resource;
pub mod resources;
pub mod types;
pub mod union;

pub use builder::AuthorizerChainBuilder;
pub use impersonation::ImpersonationAuthorizer;
pub use namespace::NamespaceAuthorizer;
pub use org_role::OrgRoleAuthorizer;
pub use privileged::{PrivilegedGroupBypass, SYSTEM_PRIVILEGED_GROUP};
pub use registry::ApiGroupRegistry;
pub use resource::ResourceAuthorizer;
pub use types::{Authorizer, AuthzResult, Decision, GroupVersion, RequestAttributes};
pub use union::UnionAuthorizer;
