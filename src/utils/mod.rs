//! Utility modules for the authorization engine
//!
//! - **error**: error taxonomy and its HTTP mapping

pub mod error;

pub use error::{AuthzError, Result};
