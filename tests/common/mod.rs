//! Common test utilities for authz-engine
//!
//! # Usage
//!
//! ```rust
//! use crate::common::fixtures::{IdentityFactory, StaticAccessClient};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let client = StaticAccessClient::denying();
//!     let ctx = IdentityFactory::session(OrgRole::Viewer);
//!     // ...
//! }
//! ```

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{IdentityFactory, RequestFactory, StaticAccessClient};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
