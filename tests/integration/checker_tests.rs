//! Access checker integration tests
//!
//! Identity resolution per mode and the legacy role fallback.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{IdentityFactory, RequestFactory, StaticAccessClient};
    use crate::{assert_err, assert_ok};
    use authz_engine::auth::{
        AccessCheck, AccessChecker, AuthContext, IdentityType, LegacyAccessClient, OrgRole,
        ResourceMapping, SignedInUser, TokenIdentity,
    };
    use std::time::Duration;

    // ==================== Trusted callers ====================

    #[tokio::test]
    async fn test_access_policy_allowed_whatever_the_client_says() {
        for client in [
            StaticAccessClient::denying(),
            StaticAccessClient::failing(),
        ] {
            let checker = AccessChecker::access_token(client.clone());
            assert_ok!(
                checker
                    .check(&IdentityFactory::access_policy(), RequestFactory::dashboard_check("delete"), "")
                    .await
            );
            assert_eq!(client.call_count(), 0);
        }
    }

    // ==================== Fallback ====================

    /// Single-tenant checker, fallback Admin, client denies, requester is Admin
    #[tokio::test]
    async fn test_admin_rescued_by_fallback() {
        let checker = AccessChecker::session(StaticAccessClient::denying()).with_fallback(OrgRole::Admin);
        assert_ok!(
            checker
                .check(&IdentityFactory::session(OrgRole::Admin), RequestFactory::dashboard_check("update"), "")
                .await
        );
    }

    /// Same checker, requester is only a Viewer
    #[tokio::test]
    async fn test_viewer_not_rescued_by_admin_fallback() {
        let checker = AccessChecker::session(StaticAccessClient::denying()).with_fallback(OrgRole::Admin);
        let err = assert_err!(
            checker
                .check(&IdentityFactory::session(OrgRole::Viewer), RequestFactory::dashboard_check("update"), "")
                .await
        );
        assert!(err.is_forbidden());
    }

    #[tokio::test]
    async fn test_client_failure_rescued_by_fallback() {
        let checker = AccessChecker::session(StaticAccessClient::failing()).with_fallback(OrgRole::Editor);
        assert_ok!(
            checker
                .check(&IdentityFactory::session(OrgRole::Admin), RequestFactory::dashboard_check("get"), "")
                .await
        );
    }

    #[tokio::test]
    async fn test_client_failure_without_fallback_is_forbidden_with_cause() {
        let checker = AccessChecker::session(StaticAccessClient::failing());
        let err = assert_err!(
            checker
                .check(&IdentityFactory::session(OrgRole::Admin), RequestFactory::dashboard_check("get"), "")
                .await
        );
        assert!(err.is_forbidden());
        assert!(err.reason().contains("permission service unavailable"));
    }

    #[tokio::test]
    async fn test_derived_checkers_are_independent() {
        let base = AccessChecker::session(StaticAccessClient::denying());
        let lenient = base.with_fallback(OrgRole::Viewer);
        let strict = base.with_fallback(OrgRole::Admin);
        let ctx = IdentityFactory::session(OrgRole::Editor);

        assert!(base.check(&ctx, RequestFactory::dashboard_check("get"), "").await.is_err());
        assert!(lenient.check(&ctx, RequestFactory::dashboard_check("get"), "").await.is_ok());
        assert!(strict.check(&ctx, RequestFactory::dashboard_check("get"), "").await.is_err());
        assert_eq!(base.fallback_role(), None);
    }

    // ==================== Identity resolution ====================

    /// Token mode, no token, but a session Admin requester is present
    #[tokio::test]
    async fn test_unified_falls_through_to_session_token_only_does_not() {
        let ctx = IdentityFactory::session(OrgRole::Admin);

        let unified = AccessChecker::unified(StaticAccessClient::allowing(), false);
        assert_ok!(unified.check(&ctx, RequestFactory::dashboard_check("get"), "").await);

        let token_only = AccessChecker::access_token(StaticAccessClient::allowing());
        let err = assert_err!(token_only.check(&ctx, RequestFactory::dashboard_check("get"), "").await);
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_no_identity_is_unauthorized_in_every_mode() {
        let checkers = [
            AccessChecker::access_token(StaticAccessClient::allowing()),
            AccessChecker::session(StaticAccessClient::allowing()),
            AccessChecker::unified(StaticAccessClient::allowing(), false),
            AccessChecker::unified(StaticAccessClient::allowing(), true),
        ];
        for checker in checkers {
            let err = assert_err!(
                checker
                    .check(&IdentityFactory::no_identity(), RequestFactory::dashboard_check("get"), "")
                    .await
            );
            assert!(err.is_unauthorized(), "mode {:?}", checker.mode());
        }
    }

    #[tokio::test]
    async fn test_exclusive_unified_ignores_fallback() {
        let client = StaticAccessClient::denying();
        let checker = AccessChecker::unified(client.clone(), true).with_fallback(OrgRole::Viewer);
        let ctx = AuthContext::new()
            .with_access_token(TokenIdentity::new(IdentityType::ServiceAccount, "sa", "default"))
            .with_requester(SignedInUser::new(IdentityType::User, "123", 1).with_role(OrgRole::Admin));

        assert!(checker.check(&ctx, RequestFactory::dashboard_check("get"), "").await.is_err());
        let (typed_uid, _, _) = client.last_call().unwrap();
        assert_eq!(typed_uid, "service-account:sa");
    }

    #[tokio::test]
    async fn test_empty_namespace_filled_from_identity() {
        let client = StaticAccessClient::allowing();
        let checker = AccessChecker::session(client.clone());
        let ctx = AuthContext::new()
            .with_requester(SignedInUser::new(IdentityType::User, "123", 7).with_role(OrgRole::Viewer));

        assert_ok!(checker.check(&ctx, RequestFactory::dashboard_check("get"), "folder-a").await);
        let (_, req, folder) = client.last_call().unwrap();
        assert_eq!(req.namespace, "org-7");
        assert_eq!(folder, "folder-a");
    }

    // ==================== Deadline ====================

    #[tokio::test]
    async fn test_deadline_bounds_client_call() {
        let checker = AccessChecker::session(StaticAccessClient::hanging());
        let ctx = IdentityFactory::session(OrgRole::Viewer).with_timeout(Duration::from_millis(20));

        let started = std::time::Instant::now();
        let err = assert_err!(checker.check(&ctx, RequestFactory::dashboard_check("get"), "").await);
        assert!(err.is_forbidden());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    // ==================== Legacy client ====================

    #[tokio::test]
    async fn test_legacy_client_through_checker() {
        let client = std::sync::Arc::new(LegacyAccessClient::new([ResourceMapping::new(
            "dashboard.grafana.app",
            "dashboards",
            "dashboards",
        )
        .with_action("get", "dashboards:read")]));
        let checker = AccessChecker::session(client);

        let reader = AuthContext::new().with_requester(
            SignedInUser::new(IdentityType::User, "123", 1)
                .with_permission("dashboards:read", "folders:uid:team-a"),
        );

        assert_ok!(checker.check(&reader, RequestFactory::dashboard_check("get"), "team-a").await);
        assert!(checker.check(&reader, RequestFactory::dashboard_check("get"), "team-b").await.is_err());
        assert!(checker.check(&reader, RequestFactory::dashboard_check("update"), "team-a").await.is_err());
    }
}
