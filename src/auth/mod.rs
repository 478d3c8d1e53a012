//! Identity resolution and access checks
//!
//! This module resolves the calling principal and answers single
//! "may this identity do X" questions, with legacy role fallback.

pub mod checker;
pub mod identity;
pub mod legacy;

// Re-export commonly used types
pub use checker::{AccessCheck, AccessChecker, AccessClient, CheckRequest, CheckResponse, CheckerMode};
pub use identity::{
    AuthContext, Identity, IdentityType, NamespaceInfo, OrgRole, SignedInUser, TokenIdentity,
};
pub use legacy::{LegacyAccessClient, ResourceMapping};
