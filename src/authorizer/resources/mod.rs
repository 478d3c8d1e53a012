//! Authorizers for individual resource kinds

mod logs_drilldown;
mod receiver;
mod user_storage;

pub use logs_drilldown::{
    ACTION_DEFAULTS_WRITE, LOGS_DRILLDOWN_DEFAULTS_RESOURCE, LOGS_DRILLDOWN_RESOURCE,
    LogsDrilldownAuthorizer,
};
#[cfg(test)]
pub use receiver::MockReceiverAccess;
pub use receiver::{RECEIVER_RESOURCE, ReceiverAccess, ReceiverAuthorizer, ReceiverPermissions};
pub use user_storage::{USER_STORAGE_RESOURCE, UserStorageAuthorizer};

use super::registry::ApiGroupRegistry;
use crate::utils::error::Result;
use std::sync::Arc;

pub const NOTIFICATIONS_GROUP: &str = "notifications.alerting.grafana.app";
pub const USER_STORAGE_GROUP: &str = "userstorage.grafana.app";
pub const LOGS_DRILLDOWN_GROUP: &str = "logsdrilldown.grafana.app";

/// Register the built-in resource authorizers with their API groups
pub fn register_resource_authorizers(
    registry: &ApiGroupRegistry,
    receivers: Arc<dyn ReceiverAccess>,
) -> Result<()> {
    registry.register(
        NOTIFICATIONS_GROUP,
        "v0alpha1",
        Arc::new(ReceiverAuthorizer::new(receivers)),
    )?;
    registry.register(USER_STORAGE_GROUP, "v0alpha1", Arc::new(UserStorageAuthorizer))?;
    registry.register(LOGS_DRILLDOWN_GROUP, "v1alpha1", Arc::new(LogsDrilldownAuthorizer))?;
    Ok(())
}
