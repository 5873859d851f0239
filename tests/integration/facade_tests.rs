//! Authentication facade integration tests
//!
//! Verifies the credential precedence rules: session cookie first, bearer
//! token as the fallback, and the permission view each source grants.

#[cfg(test)]
mod tests {
    use crate::common::{TestAuth, TokenParamsFactory, UserFactory};
    use lynxprompt_rs::auth::{AuthSource, CreateTokenOutcome};
    use lynxprompt_rs::core::models::api_token::{TokenAction, TokenRole};
    use lynxprompt_rs::storage::database::entities::user;
    use lynxprompt_rs::utils::crypto::generate_browser_session_token;

    const ALL_ACTIONS: [TokenAction; 4] = [
        TokenAction::BlueprintsRead,
        TokenAction::BlueprintsWrite,
        TokenAction::ProfileRead,
        TokenAction::ProfileWrite,
    ];

    async fn registered(harness: &TestAuth) -> (user::Model, String) {
        let signup = UserFactory::signup();
        match harness
            .auth
            .sessions
            .register(&signup.email, &signup.name, &signup.password)
            .await
            .expect("Registration failed")
        {
            lynxprompt_rs::auth::RegisterOutcome::Registered {
                user,
                session_token,
            } => (user, session_token),
            lynxprompt_rs::auth::RegisterOutcome::EmailTaken => panic!("Email unexpectedly taken"),
        }
    }

    async fn minted_bearer(harness: &TestAuth, user_id: uuid::Uuid, role: TokenRole) -> String {
        match harness
            .auth
            .tokens
            .create_token(user_id, TokenParamsFactory::with_role(role))
            .await
            .expect("Creation failed")
        {
            CreateTokenOutcome::Created { raw_token, .. } => format!("Bearer {}", raw_token),
            CreateTokenOutcome::QuotaExceeded { .. } => panic!("Quota unexpectedly hit"),
        }
    }

    // ==================== Credential precedence ====================

    /// Test that a session cookie authenticates without any role restriction
    #[tokio::test]
    async fn test_session_cookie_authenticates() {
        let harness = TestAuth::new().await;
        let (user, session_token) = registered(&harness).await;

        let ctx = harness
            .auth
            .facade
            .authenticate(Some(&session_token), None)
            .await
            .expect("Authentication errored")
            .expect("Session cookie should authenticate");

        assert_eq!(ctx.user.id, user.id);
        assert_eq!(ctx.source, AuthSource::Session);
        assert!(ctx.token_id.is_none());
        assert!(ctx.role.is_none());
        for action in ALL_ACTIONS {
            assert!(ctx.can(action), "Sessions are not role-scoped: {}", action);
        }
    }

    /// Test that a bearer token authenticates when no cookie is present
    #[tokio::test]
    async fn test_bearer_fallback() {
        let harness = TestAuth::new().await;
        let (user, _) = registered(&harness).await;
        let bearer = minted_bearer(&harness, user.id, TokenRole::BlueprintsReadonly).await;

        let ctx = harness
            .auth
            .facade
            .authenticate(None, Some(&bearer))
            .await
            .expect("Authentication errored")
            .expect("Bearer token should authenticate");

        assert_eq!(ctx.user.id, user.id);
        assert_eq!(ctx.source, AuthSource::Token);
        assert!(ctx.token_id.is_some());
        assert_eq!(ctx.role, Some(TokenRole::BlueprintsReadonly));
    }

    /// Test that a valid cookie wins over a valid bearer token
    #[tokio::test]
    async fn test_cookie_takes_precedence() {
        let harness = TestAuth::new().await;
        let (user, session_token) = registered(&harness).await;
        let bearer = minted_bearer(&harness, user.id, TokenRole::BlueprintsReadonly).await;

        let ctx = harness
            .auth
            .facade
            .authenticate(Some(&session_token), Some(&bearer))
            .await
            .expect("Authentication errored")
            .expect("Request should authenticate");

        assert_eq!(ctx.source, AuthSource::Session);
        assert!(ctx.role.is_none());
    }

    /// Test that a dead cookie falls through to the bearer token
    #[tokio::test]
    async fn test_dead_cookie_falls_back_to_bearer() {
        let harness = TestAuth::new().await;
        let (user, _) = registered(&harness).await;
        let bearer = minted_bearer(&harness, user.id, TokenRole::Full).await;

        let ctx = harness
            .auth
            .facade
            .authenticate(Some("stale-cookie-value"), Some(&bearer))
            .await
            .expect("Authentication errored")
            .expect("Bearer should rescue the request");

        assert_eq!(ctx.source, AuthSource::Token);
        assert_eq!(ctx.user.id, user.id);
    }

    /// Test that requests without usable credentials resolve to None
    #[tokio::test]
    async fn test_unusable_credentials() {
        let harness = TestAuth::new().await;

        for (cookie, authorization) in [
            (None, None),
            (Some("never-issued"), None),
            (None, Some("Bearer lp_not_real")),
            (Some("never-issued"), Some("Basic abc")),
        ] {
            let ctx = harness
                .auth
                .facade
                .authenticate(cookie, authorization)
                .await
                .expect("Authentication errored");
            assert!(
                ctx.is_none(),
                "{:?}/{:?} should not authenticate",
                cookie,
                authorization
            );
        }
    }

    /// Test that an expired session is rejected and removed
    #[tokio::test]
    async fn test_expired_session_is_deleted() {
        let harness = TestAuth::new().await;
        let (user, _) = registered(&harness).await;

        let stale_token = generate_browser_session_token();
        harness
            .storage
            .db()
            .insert_user_session(
                &stale_token,
                user.id,
                chrono::Utc::now() - chrono::Duration::hours(1),
            )
            .await
            .expect("Insert failed");

        let ctx = harness
            .auth
            .facade
            .authenticate(Some(&stale_token), None)
            .await
            .expect("Authentication errored");
        assert!(ctx.is_none());

        assert!(
            harness
                .storage
                .db()
                .find_user_session(&stale_token)
                .await
                .expect("Lookup failed")
                .is_none(),
            "Expired session row should be deleted on sight"
        );
    }

    // ==================== Permission view ====================

    /// Test the permission view of each token role through the facade
    #[tokio::test]
    async fn test_token_roles_scope_the_context() {
        let harness = TestAuth::new().await;
        let (user, _) = registered(&harness).await;

        let readonly = minted_bearer(&harness, user.id, TokenRole::BlueprintsReadonly).await;
        let ctx = harness
            .auth
            .facade
            .authenticate(None, Some(&readonly))
            .await
            .expect("Authentication errored")
            .expect("Token should authenticate");
        assert!(ctx.can(TokenAction::BlueprintsRead));
        assert!(!ctx.can(TokenAction::BlueprintsWrite));
        assert!(!ctx.can(TokenAction::ProfileRead));

        let full = minted_bearer(&harness, user.id, TokenRole::Full).await;
        let ctx = harness
            .auth
            .facade
            .authenticate(None, Some(&full))
            .await
            .expect("Authentication errored")
            .expect("Token should authenticate");
        for action in ALL_ACTIONS {
            assert!(ctx.can(action), "FULL grants everything: {}", action);
        }

        let profile = minted_bearer(&harness, user.id, TokenRole::ProfileFull).await;
        let ctx = harness
            .auth
            .facade
            .authenticate(None, Some(&profile))
            .await
            .expect("Authentication errored")
            .expect("Token should authenticate");
        assert!(ctx.can(TokenAction::ProfileWrite));
        assert!(!ctx.can(TokenAction::BlueprintsRead));
    }
}
