//! Test fixtures and data factories
//!
//! All fixtures are real implementations, not mocks.

use async_trait::async_trait;
use authz_engine::auth::{
    AccessClient, AuthContext, CheckRequest, CheckResponse, Identity, IdentityType, OrgRole,
    SignedInUser, TokenIdentity,
};
use authz_engine::{AuthzError, RequestAttributes, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// What a [`StaticAccessClient`] answers
#[derive(Debug, Clone)]
pub enum Answer {
    Allow,
    Deny,
    Fail(String),
    /// Never answers within any reasonable deadline
    Hang,
}

/// Permission-check client with a fixed answer that records every call
#[derive(Debug)]
pub struct StaticAccessClient {
    answer: Answer,
    calls: Mutex<Vec<(String, CheckRequest, String)>>,
}

impl StaticAccessClient {
    pub fn new(answer: Answer) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn allowing() -> Arc<Self> {
        Self::new(Answer::Allow)
    }

    pub fn denying() -> Arc<Self> {
        Self::new(Answer::Deny)
    }

    pub fn failing() -> Arc<Self> {
        Self::new(Answer::Fail("permission service unavailable".to_string()))
    }

    pub fn hanging() -> Arc<Self> {
        Self::new(Answer::Hang)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Typed uid, request and folder of the last call
    pub fn last_call(&self) -> Option<(String, CheckRequest, String)> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl AccessClient for StaticAccessClient {
    async fn check(&self, identity: &Identity, req: &CheckRequest, folder: &str) -> Result<CheckResponse> {
        self.calls
            .lock()
            .push((identity.typed_uid(), req.clone(), folder.to_string()));

        match &self.answer {
            Answer::Allow => Ok(CheckResponse::allowed()),
            Answer::Deny => Ok(CheckResponse::denied()),
            Answer::Fail(msg) => Err(AuthzError::client(msg.clone())),
            Answer::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(CheckResponse::allowed())
            }
        }
    }
}

/// Factory for identities placed into an [`AuthContext`]
pub struct IdentityFactory;

impl IdentityFactory {
    pub fn user(role: OrgRole) -> SignedInUser {
        SignedInUser::new(IdentityType::User, "123", 1)
            .with_login("tester")
            .with_role(role)
    }

    /// Session requester in org 1
    pub fn session(role: OrgRole) -> AuthContext {
        AuthContext::new().with_requester(Self::user(role))
    }

    pub fn token(identity_type: IdentityType) -> AuthContext {
        AuthContext::new().with_access_token(TokenIdentity::new(identity_type, "svc-1", "stacks-12"))
    }

    pub fn access_policy() -> AuthContext {
        Self::token(IdentityType::AccessPolicy)
    }

    /// Context carrying neither a token nor a requester
    pub fn no_identity() -> AuthContext {
        AuthContext::new()
    }
}

/// Factory for request attributes
pub struct RequestFactory;

impl RequestFactory {
    pub fn dashboards(verb: &str) -> RequestAttributes {
        RequestAttributes::resource(verb, "dashboard.grafana.app", "v1", "dashboards")
            .with_namespace("default")
            .with_name("d1")
    }

    pub fn dashboard_check(verb: &str) -> CheckRequest {
        CheckRequest::new(verb, "dashboard.grafana.app", "dashboards").with_name("d1")
    }

    pub fn user_storage(verb: &str, name: &str) -> RequestAttributes {
        RequestAttributes::resource(verb, "userstorage.grafana.app", "v0alpha1", "user-storage")
            .with_namespace("default")
            .with_name(name)
    }
}
