//! Access checker
//!
//! Resolves the caller, asks the permission check client, and lets a legacy
//! org role rescue denials while fine-grained permissions are rolled out.

mod checker;
mod client;
mod fallback;
mod types;

pub use checker::{AccessCheck, AccessChecker};
#[cfg(test)]
pub use client::MockAccessClient;
pub use client::AccessClient;
pub use types::{CheckRequest, CheckResponse, CheckerMode};
