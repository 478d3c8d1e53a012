//! Error handling integration tests
//!
//! Checks that refusals, missing identities and system faults stay
//! distinguishable all the way to the HTTP surface.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{IdentityFactory, RequestFactory, StaticAccessClient};
    use actix_web::ResponseError;
    use authz_engine::auth::{AccessCheck, AccessChecker, OrgRole};
    use authz_engine::authorizer::ResourceAuthorizer;
    use authz_engine::{Authorizer, AuthzError};
    use std::sync::Arc;

    // ==================== Status mapping ====================

    #[test]
    fn test_unauthorized_maps_to_401() {
        let err = AuthzError::unauthorized("no identity in context");
        assert_eq!(err.error_response().status().as_u16(), 401);
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let err = AuthzError::missing_permission("dashboards:write", Some("dashboards:uid:d1".into()));
        assert_eq!(err.error_response().status().as_u16(), 403);
        assert!(err.reason().contains("dashboards:write"));
    }

    #[test]
    fn test_system_faults_map_to_5xx() {
        assert_eq!(AuthzError::client("refused").status_code().as_u16(), 502);
        assert_eq!(AuthzError::timeout("deadline").status_code().as_u16(), 504);
        assert_eq!(AuthzError::internal("boom").status_code().as_u16(), 500);
    }

    // ==================== Flow through the checker ====================

    #[tokio::test]
    async fn test_missing_identity_flows_as_unauthorized() {
        let checker = AccessChecker::session(StaticAccessClient::allowing());
        let err = checker
            .check(&IdentityFactory::no_identity(), RequestFactory::dashboard_check("get"), "")
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_denial_flows_as_forbidden() {
        let checker = AccessChecker::session(StaticAccessClient::denying()).with_fallback(OrgRole::Admin);
        let err = checker
            .check(&IdentityFactory::session(OrgRole::Viewer), RequestFactory::dashboard_check("update"), "")
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
        assert!(!err.is_system_fault());
        assert_eq!(err.status_code().as_u16(), 403);
    }

    #[tokio::test]
    async fn test_refusal_becomes_deny_not_error_in_authorizer() {
        let checker = Arc::new(AccessChecker::session(StaticAccessClient::failing()));
        let result = ResourceAuthorizer::new(checker)
            .authorize(&IdentityFactory::session(OrgRole::Viewer), &RequestFactory::dashboards("get"))
            .await
            .unwrap();
        assert!(!result.is_allowed());
        assert!(result.reason.contains("access check failed"));
    }
}
