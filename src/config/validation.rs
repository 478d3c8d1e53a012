//! Configuration validation

use crate::auth::legacy::ResourceMapping;
use crate::authorizer::GroupVersion;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for ResourceMapping {
    fn validate(&self) -> Result<(), String> {
        if self.resource.is_empty() {
            return Err(format!(
                "legacy resource mapping in group '{}' must name a resource",
                self.group
            ));
        }
        if self.kind.is_empty() {
            return Err(format!(
                "legacy resource mapping for '{}' must name a scope kind",
                self.resource
            ));
        }
        if self.actions.is_empty() {
            return Err(format!(
                "legacy resource mapping for '{}' must map at least one verb",
                self.resource
            ));
        }
        if let Some((verb, _)) = self.actions.iter().find(|(_, action)| action.is_empty()) {
            return Err(format!(
                "legacy resource mapping for '{}' has an empty action for verb '{}'",
                self.resource, verb
            ));
        }
        Ok(())
    }
}

impl Validate for GroupVersion {
    fn validate(&self) -> Result<(), String> {
        if self.version.is_empty() {
            return Err(format!("api group '{}' must specify a version", self.group));
        }
        Ok(())
    }
}
