//! Configuration management for the authorization engine
//!
//! Loads, merges and validates the settings that shape the access checker
//! and the authorizer chain.

mod validation;


pub use validation::Validate;

use crate::auth::checker::CheckerMode;
use crate::auth::identity::{OrgRole, deserialize_fallback_role, parse_fallback_role};
use crate::auth::legacy::ResourceMapping;
use crate::authorizer::GroupVersion;
use crate::authorizer::privileged::SYSTEM_PRIVILEGED_GROUP;
use crate::utils::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Where the access checker takes the caller's identity from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// Verified access tokens only (multi-tenant)
    AccessToken,
    /// Session requesters only (single-tenant)
    #[default]
    Session,
    /// Access token when trusted, otherwise the session requester
    Unified,
}

impl std::str::FromStr for IdentitySource {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "access_token" => Ok(IdentitySource::AccessToken),
            "session" => Ok(IdentitySource::Session),
            "unified" => Ok(IdentitySource::Unified),
            other => Err(AuthzError::config(format!("invalid identity mode: {}", other))),
        }
    }
}

/// Authorization engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Identity resolution mode
    #[serde(default)]
    pub mode: IdentitySource,
    /// Unified mode only: trust the access token over the session
    #[serde(default)]
    pub use_exclusively_access_checker: bool,
    /// Legacy role that rescues a fine-grained denial
    #[serde(default, deserialize_with = "deserialize_fallback_role")]
    pub fallback_role: Option<OrgRole>,
    /// Groups that skip namespace scoping
    #[serde(default = "default_privileged_groups")]
    pub privileged_groups: Vec<String>,
    /// Cloud stack served by this instance
    #[serde(default)]
    pub stack_id: Option<i64>,
    /// Resource mappings for the legacy permission-map client
    #[serde(default)]
    pub legacy_resources: Vec<ResourceMapping>,
    /// Group/versions authorized through the access checker
    #[serde(default)]
    pub api_groups: Vec<GroupVersion>,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            mode: IdentitySource::default(),
            use_exclusively_access_checker: false,
            fallback_role: None,
            privileged_groups: default_privileged_groups(),
            stack_id: None,
            legacy_resources: Vec::new(),
            api_groups: Vec::new(),
        }
    }
}

fn default_privileged_groups() -> Vec<String> {
    vec![SYSTEM_PRIVILEGED_GROUP.to_string()]
}

impl AuthzConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AuthzError::config(format!("Failed to read config file: {}", e)))?;

        let config: AuthzConfig = serde_yaml::from_str(&content)
            .map_err(|e| AuthzError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().apply(ConfigOverrides::from_env()?);
        config.validate()?;
        Ok(config)
    }

    /// Apply the fields an override layer actually set
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(exclusive) = overrides.use_exclusively_access_checker {
            self.use_exclusively_access_checker = exclusive;
        }
        if let Some(role) = overrides.fallback_role {
            self.fallback_role = role;
        }
        if let Some(groups) = overrides.privileged_groups {
            self.privileged_groups = groups;
        }
        if let Some(stack_id) = overrides.stack_id {
            self.stack_id = Some(stack_id);
        }
        self
    }

    /// Checker mode derived from `mode` and the exclusivity flag
    pub fn checker_mode(&self) -> CheckerMode {
        match self.mode {
            IdentitySource::AccessToken => CheckerMode::AccessToken,
            IdentitySource::Session => CheckerMode::Session,
            IdentitySource::Unified => CheckerMode::Unified {
                use_exclusively_access_checker: self.use_exclusively_access_checker,
            },
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        if self.privileged_groups.iter().any(|g| g.trim().is_empty()) {
            return Err(AuthzError::config(
                "privileged groups must not contain empty names",
            ));
        }

        if self.fallback_role.is_some() && self.mode == IdentitySource::AccessToken {
            return Err(AuthzError::config(
                "fallback_role has no effect with mode access_token",
            ));
        }

        if self.use_exclusively_access_checker && self.mode != IdentitySource::Unified {
            warn!("use_exclusively_access_checker is only meaningful with mode unified");
        }

        for mapping in &self.legacy_resources {
            mapping
                .validate()
                .map_err(|e| AuthzError::config(format!("Legacy resource error: {}", e)))?;
        }

        for group in &self.api_groups {
            group
                .validate()
                .map_err(|e| AuthzError::config(format!("API group error: {}", e)))?;
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration file
    ///
    /// Scalars in `other` win only where they differ from the defaults, so a
    /// second file cannot reset a value; use [`AuthzConfig::apply`] for that.
    pub fn merge(mut self, other: Self) -> Self {
        if other.mode != IdentitySource::default() {
            self.mode = other.mode;
        }
        if other.use_exclusively_access_checker {
            self.use_exclusively_access_checker = true;
        }
        if other.fallback_role.is_some() {
            self.fallback_role = other.fallback_role;
        }
        if other.privileged_groups != default_privileged_groups() {
            self.privileged_groups = other.privileged_groups;
        }
        if other.stack_id.is_some() {
            self.stack_id = other.stack_id;
        }

        for mapping in other.legacy_resources {
            self.legacy_resources
                .retain(|m| !(m.group == mapping.group && m.resource == mapping.resource));
            self.legacy_resources.push(mapping);
        }
        for group in other.api_groups {
            if !self.api_groups.contains(&group) {
                self.api_groups.push(group);
            }
        }
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AuthzError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

/// Explicitly set configuration values, e.g. from `AUTHZ_*` variables
///
/// `None` leaves the underlying value alone. `fallback_role: Some(None)`
/// clears the fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub mode: Option<IdentitySource>,
    pub use_exclusively_access_checker: Option<bool>,
    pub fallback_role: Option<Option<OrgRole>>,
    pub privileged_groups: Option<Vec<String>>,
    pub stack_id: Option<i64>,
}

impl ConfigOverrides {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through a variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overrides = Self::default();

        if let Some(mode) = lookup("AUTHZ_MODE") {
            overrides.mode = Some(mode.parse()?);
        }
        if let Some(flag) = lookup("AUTHZ_EXCLUSIVE_ACCESS_CHECKER") {
            overrides.use_exclusively_access_checker =
                Some(parse_bool("AUTHZ_EXCLUSIVE_ACCESS_CHECKER", &flag)?);
        }
        if let Some(role) = lookup("AUTHZ_FALLBACK_ROLE") {
            overrides.fallback_role = Some(parse_fallback_role(&role)?);
        }
        if let Some(groups) = lookup("AUTHZ_PRIVILEGED_GROUPS") {
            overrides.privileged_groups = Some(
                groups
                    .split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        if let Some(stack) = lookup("AUTHZ_STACK_ID") {
            let id = stack
                .parse::<i64>()
                .map_err(|e| AuthzError::config(format!("Invalid AUTHZ_STACK_ID: {}", e)))?;
            overrides.stack_id = Some(id);
        }

        debug!("Configuration overrides: {:?}", overrides);
        Ok(overrides)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AuthzError::config(format!("Invalid {}: {}", name, other))),
    }
}
