//! Error handling for the authorization engine
//!
//! This module defines the error taxonomy surfaced by access checks and authorizers.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{AuthzError, PermissionRequirement, Result};
