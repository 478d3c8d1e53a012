//! Identity type and organization role definitions

use crate::utils::error::{AuthzError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of principal making a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityType {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "api-key")]
    ApiKey,
    #[serde(rename = "service-account")]
    ServiceAccount,
    #[serde(rename = "anonymous")]
    Anonymous,
    #[serde(rename = "render")]
    RenderService,
    /// Trusted internal caller, never subject to fine-grained checks
    #[serde(rename = "access-policy")]
    AccessPolicy,
    #[serde(rename = "provisioning")]
    Provisioning,
    #[serde(rename = "")]
    Empty,
}

impl IdentityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityType::User => "user",
            IdentityType::ApiKey => "api-key",
            IdentityType::ServiceAccount => "service-account",
            IdentityType::Anonymous => "anonymous",
            IdentityType::RenderService => "render",
            IdentityType::AccessPolicy => "access-policy",
            IdentityType::Provisioning => "provisioning",
            IdentityType::Empty => "",
        }
    }
}

impl fmt::Display for IdentityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentityType {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(IdentityType::User),
            "api-key" => Ok(IdentityType::ApiKey),
            "service-account" => Ok(IdentityType::ServiceAccount),
            "anonymous" => Ok(IdentityType::Anonymous),
            "render" => Ok(IdentityType::RenderService),
            "access-policy" => Ok(IdentityType::AccessPolicy),
            "provisioning" => Ok(IdentityType::Provisioning),
            "" => Ok(IdentityType::Empty),
            other => Err(AuthzError::unauthorized(format!(
                "invalid identity type: {}",
                other
            ))),
        }
    }
}

/// Split a typed identifier such as `user:abc` into its type and bare id
pub fn parse_typed_id(typed: &str) -> Result<(IdentityType, &str)> {
    let (kind, id) = typed
        .split_once(':')
        .ok_or_else(|| AuthzError::unauthorized(format!("expected typed id, got {}", typed)))?;
    Ok((kind.parse()?, id))
}

/// Legacy organization role
///
/// Roles form a chain: `Admin` includes `Editor`, which includes `Viewer`,
/// which includes `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrgRole {
    #[default]
    None,
    Viewer,
    Editor,
    Admin,
}

impl OrgRole {
    fn rank(self) -> u8 {
        match self {
            OrgRole::None => 0,
            OrgRole::Viewer => 1,
            OrgRole::Editor => 2,
            OrgRole::Admin => 3,
        }
    }

    /// Whether holding `self` satisfies a requirement of `other`
    pub fn includes(self, other: OrgRole) -> bool {
        self.rank() >= other.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrgRole::None => "None",
            OrgRole::Viewer => "Viewer",
            OrgRole::Editor => "Editor",
            OrgRole::Admin => "Admin",
        }
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrgRole {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "None" => Ok(OrgRole::None),
            "Viewer" => Ok(OrgRole::Viewer),
            "Editor" => Ok(OrgRole::Editor),
            "Admin" => Ok(OrgRole::Admin),
            other => Err(AuthzError::config(format!("invalid org role: {}", other))),
        }
    }
}

/// Parse a fallback role where the empty string means "no fallback"
pub fn parse_fallback_role(s: &str) -> Result<Option<OrgRole>> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse().map(Some)
}

/// Serde adapter for optional fallback roles that accepts `""` as none
pub(crate) fn deserialize_fallback_role<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<OrgRole>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_fallback_role(&s).map_err(serde::de::Error::custom),
    }
}
