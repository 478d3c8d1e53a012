//! Permission check client boundary

use super::types::{CheckRequest, CheckResponse};
use crate::auth::identity::Identity;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Fine-grained permission service consulted for a single yes/no question.
///
/// Implementations must be side-effect free and must not retry; dropping the
/// returned future cancels the call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessClient: Send + Sync {
    async fn check(
        &self,
        identity: &Identity,
        req: &CheckRequest,
        folder: &str,
    ) -> Result<CheckResponse>;
}
