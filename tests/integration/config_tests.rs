//! Configuration and engine assembly integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::RequestFactory;
    use crate::{assert_err, assert_ok};
    use authz_engine::auth::{AuthContext, CheckerMode, IdentityType, OrgRole, SignedInUser};
    use authz_engine::config::IdentitySource;
    use authz_engine::{AuthzConfig, AuthzEngine, AuthzError, Decision, EvaluationRequest};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG: &str = r#"
mode: session
fallback_role: Admin
legacy_resources:
  - group: "dashboard.grafana.app"
    resource: "dashboards"
    kind: "dashboards"
    actions:
      get: "dashboards:read"
      update: "dashboards:write"
api_groups:
  - group: "dashboard.grafana.app"
    version: "v1"
"#;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // ==================== Loading ====================

    #[tokio::test]
    async fn test_engine_from_yaml_config() {
        let file = write_temp(CONFIG);
        let config = assert_ok!(AuthzConfig::from_file(file.path()).await);
        assert_eq!(config.checker_mode(), CheckerMode::Session);

        let engine = assert_ok!(AuthzEngine::from_config(&config));

        let reader = AuthContext::new().with_requester(
            SignedInUser::new(IdentityType::User, "123", 1)
                .with_role(OrgRole::Viewer)
                .with_permission("dashboards:read", "dashboards:uid:d1"),
        );
        let read = assert_ok!(engine.authorize(&reader, &RequestFactory::dashboards("get")).await);
        let write = assert_ok!(engine.authorize(&reader, &RequestFactory::dashboards("update")).await);
        assert_eq!(read.decision, Decision::Allow);
        assert_eq!(write.decision, Decision::Deny);

        // Admin fallback rescues the missing write permission
        let admin = AuthContext::new()
            .with_requester(SignedInUser::new(IdentityType::User, "9", 1).with_role(OrgRole::Admin));
        let rescued = assert_ok!(engine.authorize(&admin, &RequestFactory::dashboards("update")).await);
        assert_eq!(rescued.decision, Decision::Allow);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let file = write_temp("mode: access_token\nfallback_role: Viewer\n");
        let err = assert_err!(AuthzConfig::from_file(file.path()).await);
        assert!(matches!(err, AuthzError::Config(_)));
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = AuthzConfig {
            mode: IdentitySource::AccessToken,
            fallback_role: Some(OrgRole::Admin),
            ..Default::default()
        };
        assert!(AuthzEngine::from_config(&config).is_err());
    }

    // ==================== Request descriptions ====================

    #[tokio::test]
    async fn test_evaluation_request_from_yaml() {
        let raw = r#"
requester:
  identity_type: user
  uid: "123"
  org_id: 1
  org_role: Editor
timeout_ms: 250
attributes:
  verb: update
  api_group: folder.grafana.app
  api_version: v1
  resource: folders
  namespace: default
  name: f1
"#;
        let request: EvaluationRequest = serde_yaml::from_str(raw).unwrap();
        let (ctx, attrs) = request.into_parts();

        let requester = ctx.requester().unwrap();
        assert_eq!(requester.namespace, "default");
        assert!(ctx.deadline().is_some());

        let engine = assert_ok!(AuthzEngine::from_config(&AuthzConfig::default()));
        let result = assert_ok!(engine.authorize(&ctx, &attrs).await);
        assert_eq!(result.decision, Decision::Allow);
    }
}
