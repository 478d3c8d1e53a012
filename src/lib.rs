//! # authz-engine
//!
//! Authorization decision engine for multi-tenant API servers.
//!
//! ## Features
//!
//! - **Access checks**: answer "may this identity do X" through a pluggable
//!   permission-check client, with an optional legacy org-role fallback
//! - **Identity modes**: access-token, session or unified identity resolution
//! - **Authorizer chain**: ordered Allow / Deny / NoOpinion rules covering
//!   impersonation, privileged groups, tenant scoping, per-API-group
//!   authorizers and org roles
//! - **Resource authorizers**: receivers, personal storage and logs drilldown
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authz_engine::{AuthContext, AuthzConfig, AuthzEngine, RequestAttributes};
//! use authz_engine::auth::{IdentityType, OrgRole, SignedInUser};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AuthzConfig::from_file("config/authz.yaml").await?;
//!     let engine = AuthzEngine::from_config(&config)?;
//!
//!     let ctx = AuthContext::new().with_requester(
//!         SignedInUser::new(IdentityType::User, "abc", 1).with_role(OrgRole::Viewer),
//!     );
//!     let attrs = RequestAttributes::resource("get", "dashboard.grafana.app", "v1", "dashboards")
//!         .with_namespace("default")
//!         .with_name("d1");
//!
//!     let result = engine.authorize(&ctx, &attrs).await?;
//!     println!("{}: {}", result.decision, result.reason);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod authorizer;
pub mod config;
pub mod engine;
pub mod utils;

// Re-export main types
pub use auth::{AccessCheck, AccessChecker, AccessClient, AuthContext, CheckRequest, CheckResponse};
pub use authorizer::{Authorizer, AuthzResult, Decision, RequestAttributes};
pub use config::AuthzConfig;
pub use engine::{AuthzEngine, EvaluationRequest};
pub use utils::error::{AuthzError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Engine build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
