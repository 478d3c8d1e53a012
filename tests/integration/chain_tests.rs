//! Authorizer chain integration tests
//!
//! Full chains assembled by the engine, with the built-in resource
//! authorizers registered.

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::fixtures::{IdentityFactory, RequestFactory, StaticAccessClient};
    use authz_engine::auth::{AuthContext, IdentityType, OrgRole, SignedInUser};
    use authz_engine::authorizer::GroupVersion;
    use authz_engine::{AuthzConfig, AuthzEngine, Decision, RequestAttributes};

    fn engine() -> AuthzEngine {
        assert_ok!(AuthzEngine::with_client(
            &AuthzConfig::default(),
            StaticAccessClient::denying()
        ))
    }

    const VERBS: &[&str] = &[
        "get",
        "list",
        "watch",
        "create",
        "update",
        "patch",
        "delete",
        "deletecollection",
    ];

    // ==================== Ordering ====================

    #[tokio::test]
    async fn test_impersonation_denied_for_admin() {
        let ctx = AuthContext::new().with_requester(
            IdentityFactory::user(OrgRole::Admin)
                .with_grafana_admin(true)
                .with_group("system:masters"),
        );
        let attrs = RequestAttributes::resource("impersonate", "", "v1", "users").with_name("bob");

        let result = assert_ok!(engine().authorize(&ctx, &attrs).await);
        assert_eq!(result.decision, Decision::Deny);
    }

    #[tokio::test]
    async fn test_admin_allowed_every_verb() {
        let engine = engine();
        let ctx = IdentityFactory::session(OrgRole::Admin);
        for verb in VERBS {
            let result = assert_ok!(engine.authorize(&ctx, &RequestFactory::dashboards(verb)).await);
            assert_eq!(result.decision, Decision::Allow, "verb {}", verb);
        }
    }

    #[tokio::test]
    async fn test_viewer_allowed_only_reads() {
        let engine = engine();
        let ctx = IdentityFactory::session(OrgRole::Viewer);
        for verb in VERBS {
            let result = assert_ok!(engine.authorize(&ctx, &RequestFactory::dashboards(verb)).await);
            let read = matches!(*verb, "get" | "list" | "watch");
            assert_eq!(result.is_allowed(), read, "verb {}", verb);
        }
    }

    #[tokio::test]
    async fn test_foreign_org_denied_before_role() {
        let ctx = IdentityFactory::session(OrgRole::Admin);
        let attrs = RequestFactory::dashboards("get").with_namespace("org-3");

        let result = assert_ok!(engine().authorize(&ctx, &attrs).await);
        assert_eq!(result.decision, Decision::Deny);
    }

    #[tokio::test]
    async fn test_access_checker_groups_get_first_refusal() {
        let config = AuthzConfig {
            api_groups: vec![GroupVersion::new("dashboard.grafana.app", "v1")],
            ..Default::default()
        };
        let client = StaticAccessClient::denying();
        let engine = assert_ok!(AuthzEngine::with_client(&config, client.clone()));

        let ctx = IdentityFactory::session(OrgRole::Admin);
        let result = assert_ok!(engine.authorize(&ctx, &RequestFactory::dashboards("get")).await);
        assert_eq!(result.decision, Decision::Deny);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_access_checker_fallback_inside_chain() {
        let config = AuthzConfig {
            fallback_role: Some(OrgRole::Editor),
            api_groups: vec![GroupVersion::new("dashboard.grafana.app", "v1")],
            ..Default::default()
        };
        let engine = assert_ok!(AuthzEngine::with_client(&config, StaticAccessClient::failing()));

        let editor = assert_ok!(
            engine
                .authorize(&IdentityFactory::session(OrgRole::Editor), &RequestFactory::dashboards("update"))
                .await
        );
        let viewer = assert_ok!(
            engine
                .authorize(&IdentityFactory::session(OrgRole::Viewer), &RequestFactory::dashboards("get"))
                .await
        );
        assert_eq!(editor.decision, Decision::Allow);
        assert_eq!(viewer.decision, Decision::Deny);
    }

    #[test]
    fn test_registry_frozen_after_assembly() {
        let engine = engine();
        assert!(engine.registry().is_frozen());
        assert!(engine.registry().contains("userstorage.grafana.app", "v0alpha1"));
    }

    // ==================== Personal storage ====================

    #[tokio::test]
    async fn test_user_storage_scenarios() {
        let engine = engine();
        let ctx = IdentityFactory::session(OrgRole::Viewer);

        let own = assert_ok!(
            engine
                .authorize(&ctx, &RequestFactory::user_storage("get", "service:123"))
                .await
        );
        let other = assert_ok!(
            engine
                .authorize(&ctx, &RequestFactory::user_storage("get", "service:456"))
                .await
        );
        assert_eq!(own.decision, Decision::Allow);
        assert_eq!(other.decision, Decision::Deny);
    }

    #[tokio::test]
    async fn test_user_storage_create_deferred_to_role() {
        let engine = engine();
        let viewer = assert_ok!(
            engine
                .authorize(
                    &IdentityFactory::session(OrgRole::Viewer),
                    &RequestFactory::user_storage("create", "service:123"),
                )
                .await
        );
        let editor = assert_ok!(
            engine
                .authorize(
                    &IdentityFactory::session(OrgRole::Editor),
                    &RequestFactory::user_storage("create", "service:123"),
                )
                .await
        );
        // the storage rule abstains, so the org role decides
        assert_eq!(viewer.decision, Decision::Deny);
        assert_eq!(editor.decision, Decision::Allow);
    }

    // ==================== Receivers ====================

    #[tokio::test]
    async fn test_receiver_permissions_in_chain() {
        let engine = engine();
        let attrs = |verb: &str| {
            RequestAttributes::resource(verb, "notifications.alerting.grafana.app", "v0alpha1", "receivers")
                .with_namespace("default")
                .with_name("r1")
        };
        let ctx = AuthContext::new().with_requester(
            SignedInUser::new(IdentityType::User, "123", 1)
                .with_role(OrgRole::Admin)
                .with_permission("alert.notifications.receivers:read", "receivers:uid:r1"),
        );

        let read = assert_ok!(engine.authorize(&ctx, &attrs("get")).await);
        let delete = assert_ok!(engine.authorize(&ctx, &attrs("delete")).await);
        let list = assert_ok!(engine.authorize(&ctx, &attrs("list")).await);

        assert_eq!(read.decision, Decision::Allow);
        // an admin role does not override the receiver rule's refusal
        assert_eq!(delete.decision, Decision::Deny);
        assert!(delete.reason.contains("alert.notifications.receivers:delete"));
        assert_eq!(list.decision, Decision::Allow);
    }

    // ==================== Logs drilldown ====================

    #[tokio::test]
    async fn test_logs_drilldown_defaults_write_gated() {
        let engine = engine();
        let attrs = RequestAttributes::resource("update", "logsdrilldown.grafana.app", "v1alpha1", "logsdrilldowndefaults")
            .with_namespace("default")
            .with_name("default");

        let admin = assert_ok!(engine.authorize(&IdentityFactory::session(OrgRole::Admin), &attrs).await);
        assert_eq!(admin.decision, Decision::Deny);

        let writer = AuthContext::new().with_requester(
            IdentityFactory::user(OrgRole::Viewer).with_permission("logs-drilldown.defaults:write", ""),
        );
        let allowed = assert_ok!(engine.authorize(&writer, &attrs).await);
        assert_eq!(allowed.decision, Decision::Allow);
    }
}
