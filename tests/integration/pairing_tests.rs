//! CLI device-pairing integration tests
//!
//! Drives the init, callback, and poll legs of the pairing protocol
//! against an in-memory database, including the callback race.

#[cfg(test)]
mod tests {
    use crate::common::{TestAuth, UserFactory};
    use lynxprompt_rs::auth::CallbackOutcome;
    use lynxprompt_rs::config::{AuthConfig, PairingConfig};
    use lynxprompt_rs::core::models::api_token::TokenRole;
    use lynxprompt_rs::core::models::cli_session::{PairingStatus, PollOutcome};
    use lynxprompt_rs::utils::crypto::is_well_formed_token;

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    }

    async fn pairing_with(config: PairingConfig) -> TestAuth {
        TestAuth::with_configs(AuthConfig::default(), config).await
    }

    // ==================== Init ====================

    /// Test that init produces an unguessable session and a usable auth URL
    #[tokio::test]
    async fn test_init_shape() {
        let harness = TestAuth::new().await;

        let init = harness.auth.pairing.init().await.expect("Init failed");

        assert_eq!(init.session_id.len(), 64);
        assert!(is_lower_hex(&init.session_id));
        assert!(
            init.auth_url.contains(&format!("session={}", init.session_id)),
            "Auth URL must carry the session id: {}",
            init.auth_url
        );
        assert!(init.expires_at > chrono::Utc::now());

        let row = harness
            .storage
            .db()
            .find_cli_session(&init.session_id)
            .await
            .expect("Lookup failed")
            .expect("Session row missing");
        assert_eq!(row.status(), PairingStatus::Pending);
        assert!(row.token.is_none());
        assert!(row.user_id.is_none());
    }

    /// Test that the pending window follows configuration
    #[tokio::test]
    async fn test_init_ttl_follows_config() {
        let harness = pairing_with(PairingConfig {
            session_ttl_secs: 120,
            ..Default::default()
        })
        .await;

        let init = harness.auth.pairing.init().await.expect("Init failed");

        let lower = chrono::Utc::now() + chrono::Duration::seconds(115);
        let upper = chrono::Utc::now() + chrono::Duration::seconds(125);
        assert!(init.expires_at > lower && init.expires_at < upper);
    }

    /// Test that two sessions never share an id
    #[tokio::test]
    async fn test_init_ids_are_unique() {
        let harness = TestAuth::new().await;
        let a = harness.auth.pairing.init().await.expect("Init failed");
        let b = harness.auth.pairing.init().await.expect("Init failed");
        assert_ne!(a.session_id, b.session_id);
    }

    // ==================== Callback ====================

    /// Test the callback against an unknown session
    #[tokio::test]
    async fn test_callback_unknown_session() {
        let harness = TestAuth::new().await;
        let user = UserFactory::seed_user(&harness.storage).await;

        let outcome = harness
            .auth
            .pairing
            .complete(&"ab".repeat(32), user.id)
            .await
            .expect("Callback errored");
        assert_eq!(outcome, CallbackOutcome::NotFound);
    }

    /// Test that the callback deletes a lapsed session and reports it
    #[tokio::test]
    async fn test_callback_expired_session() {
        let harness = TestAuth::new().await;
        let user = UserFactory::seed_user(&harness.storage).await;

        let session_id = "0f".repeat(32);
        harness
            .storage
            .db()
            .insert_cli_session(&session_id, chrono::Utc::now() - chrono::Duration::minutes(1))
            .await
            .expect("Insert failed");

        let outcome = harness
            .auth
            .pairing
            .complete(&session_id, user.id)
            .await
            .expect("Callback errored");
        assert_eq!(outcome, CallbackOutcome::Expired);

        assert!(
            harness
                .storage
                .db()
                .find_cli_session(&session_id)
                .await
                .expect("Lookup failed")
                .is_none(),
            "Expired session should be deleted by the callback"
        );

        // No token was minted for the late caller
        let active = harness
            .storage
            .db()
            .count_active_api_tokens(user.id)
            .await
            .expect("Count failed");
        assert_eq!(active, 0);
    }

    /// Test that a second, sequential callback cannot hijack a session
    #[tokio::test]
    async fn test_callback_already_completed() {
        let harness = TestAuth::new().await;
        let winner = UserFactory::seed_user(&harness.storage).await;
        let latecomer = UserFactory::seed_user(&harness.storage).await;

        let init = harness.auth.pairing.init().await.expect("Init failed");

        assert_eq!(
            harness
                .auth
                .pairing
                .complete(&init.session_id, winner.id)
                .await
                .expect("Callback errored"),
            CallbackOutcome::Completed
        );
        assert_eq!(
            harness
                .auth
                .pairing
                .complete(&init.session_id, latecomer.id)
                .await
                .expect("Callback errored"),
            CallbackOutcome::AlreadyCompleted
        );

        // The session still belongs to the winner and the latecomer got nothing
        let row = harness
            .storage
            .db()
            .find_cli_session(&init.session_id)
            .await
            .expect("Lookup failed")
            .expect("Session row missing");
        assert_eq!(row.user_id, Some(winner.id));

        let latecomer_tokens = harness
            .storage
            .db()
            .count_active_api_tokens(latecomer.id)
            .await
            .expect("Count failed");
        assert_eq!(latecomer_tokens, 0);
    }

    /// Test that racing callbacks leave exactly one live token behind
    #[tokio::test]
    async fn test_callback_race_leaves_one_token() {
        let harness = TestAuth::new().await;
        let alice = UserFactory::seed_user(&harness.storage).await;
        let bob = UserFactory::seed_user(&harness.storage).await;

        let init = harness.auth.pairing.init().await.expect("Init failed");

        let (a, b) = tokio::join!(
            harness.auth.pairing.complete(&init.session_id, alice.id),
            harness.auth.pairing.complete(&init.session_id, bob.id),
        );
        let a = a.expect("Callback errored");
        let b = b.expect("Callback errored");

        let completions = [a, b]
            .iter()
            .filter(|o| **o == CallbackOutcome::Completed)
            .count();
        assert_eq!(completions, 1, "Exactly one callback may win: {:?} {:?}", a, b);
        assert!(
            [a, b].contains(&CallbackOutcome::AlreadyCompleted),
            "The loser must observe AlreadyCompleted: {:?} {:?}",
            a,
            b
        );

        // The loser's mint, if any, was revoked again
        let alice_tokens = harness
            .storage
            .db()
            .count_active_api_tokens(alice.id)
            .await
            .expect("Count failed");
        let bob_tokens = harness
            .storage
            .db()
            .count_active_api_tokens(bob.id)
            .await
            .expect("Count failed");
        assert_eq!(alice_tokens + bob_tokens, 1);
    }

    /// Test that the pairing mint ignores the self-service quota
    #[tokio::test]
    async fn test_callback_mint_bypasses_quota() {
        let harness = TestAuth::with_configs(
            AuthConfig {
                max_tokens_per_user: 1,
                ..Default::default()
            },
            PairingConfig::default(),
        )
        .await;
        let user = UserFactory::seed_user(&harness.storage).await;

        // Fill the quota through the normal path
        harness
            .auth
            .tokens
            .create_token(
                user.id,
                lynxprompt_rs::auth::CreateTokenParams {
                    name: "Only slot".to_string(),
                    role: TokenRole::Full,
                    expiration_days: 30,
                },
            )
            .await
            .expect("Creation failed");

        let init = harness.auth.pairing.init().await.expect("Init failed");
        let outcome = harness
            .auth
            .pairing
            .complete(&init.session_id, user.id)
            .await
            .expect("Callback errored");
        assert_eq!(outcome, CallbackOutcome::Completed);

        let active = harness
            .storage
            .db()
            .count_active_api_tokens(user.id)
            .await
            .expect("Count failed");
        assert_eq!(active, 2, "The pairing mint must not be blocked by the quota");
    }

    // ==================== Poll ====================

    /// Test that unknown sessions poll as expired
    #[tokio::test]
    async fn test_poll_unknown_session() {
        let harness = TestAuth::new().await;
        let outcome = harness
            .auth
            .pairing
            .poll(&"ab".repeat(32))
            .await
            .expect("Poll errored");
        assert_eq!(outcome, PollOutcome::Expired);
    }

    /// Test polling a session that is still waiting for the browser
    #[tokio::test]
    async fn test_poll_pending_session() {
        let harness = TestAuth::new().await;
        let init = harness.auth.pairing.init().await.expect("Init failed");

        let outcome = harness
            .auth
            .pairing
            .poll(&init.session_id)
            .await
            .expect("Poll errored");
        assert_eq!(outcome, PollOutcome::Pending);
    }

    /// Test that polling a lapsed session deletes it
    #[tokio::test]
    async fn test_poll_expired_session_deletes_row() {
        let harness = TestAuth::new().await;

        let session_id = "1e".repeat(32);
        harness
            .storage
            .db()
            .insert_cli_session(&session_id, chrono::Utc::now() - chrono::Duration::minutes(1))
            .await
            .expect("Insert failed");

        let outcome = harness
            .auth
            .pairing
            .poll(&session_id)
            .await
            .expect("Poll errored");
        assert_eq!(outcome, PollOutcome::Expired);

        assert!(
            harness
                .storage
                .db()
                .find_cli_session(&session_id)
                .await
                .expect("Lookup failed")
                .is_none()
        );
    }

    /// Test that the raw token is delivered exactly once
    #[tokio::test]
    async fn test_poll_delivers_token_once() {
        let harness = TestAuth::new().await;
        let user = UserFactory::seed_user(&harness.storage).await;

        let init = harness.auth.pairing.init().await.expect("Init failed");
        harness
            .auth
            .pairing
            .complete(&init.session_id, user.id)
            .await
            .expect("Callback errored");

        let first = harness
            .auth
            .pairing
            .poll(&init.session_id)
            .await
            .expect("Poll errored");
        let raw = match first {
            PollOutcome::Completed { token, user: summary } => {
                assert_eq!(summary.id, user.id);
                assert_eq!(summary.email, user.email);
                token.expect("First completed poll must carry the token")
            }
            other => panic!("expected Completed, got {:?}", other),
        };
        assert!(is_well_formed_token(&raw));

        // The stored copy is gone as soon as it was handed out
        let row = harness
            .storage
            .db()
            .find_cli_session(&init.session_id)
            .await
            .expect("Lookup failed")
            .expect("Session row missing");
        assert!(row.token.is_none());
        assert_eq!(row.status(), PairingStatus::Completed);

        let second = harness
            .auth
            .pairing
            .poll(&init.session_id)
            .await
            .expect("Poll errored");
        match second {
            PollOutcome::Completed { token, user: summary } => {
                assert!(token.is_none(), "The token must never be disclosed twice");
                assert_eq!(summary.id, user.id);
            }
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    /// Test that the minted token authenticates with the CLI role and lifetime
    #[tokio::test]
    async fn test_minted_token_is_usable() {
        let harness = TestAuth::new().await;
        let user = UserFactory::seed_user(&harness.storage).await;

        let init = harness.auth.pairing.init().await.expect("Init failed");
        harness
            .auth
            .pairing
            .complete(&init.session_id, user.id)
            .await
            .expect("Callback errored");
        let raw = match harness
            .auth
            .pairing
            .poll(&init.session_id)
            .await
            .expect("Poll errored")
        {
            PollOutcome::Completed { token, .. } => token.expect("Token missing"),
            other => panic!("expected Completed, got {:?}", other),
        };

        let authed = harness
            .auth
            .tokens
            .validate_bearer(Some(&format!("Bearer {}", raw)))
            .await
            .expect("Validation errored")
            .expect("Minted token should authenticate");
        assert_eq!(authed.user.id, user.id);
        assert_eq!(authed.role, TokenRole::BlueprintsFull);

        let infos = harness
            .auth
            .tokens
            .list_tokens(user.id)
            .await
            .expect("Listing failed");
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].name, "CLI Token");

        let lower = chrono::Utc::now() + chrono::Duration::days(360);
        let upper = chrono::Utc::now() + chrono::Duration::days(366);
        assert!(infos[0].expires_at > lower && infos[0].expires_at < upper);
    }

    /// Test that a completed session is deleted after the grace window
    #[tokio::test]
    async fn test_completed_session_deleted_after_grace() {
        let harness = pairing_with(PairingConfig {
            completed_grace_secs: 0,
            ..Default::default()
        })
        .await;
        let user = UserFactory::seed_user(&harness.storage).await;

        let init = harness.auth.pairing.init().await.expect("Init failed");
        harness
            .auth
            .pairing
            .complete(&init.session_id, user.id)
            .await
            .expect("Callback errored");
        harness
            .auth
            .pairing
            .poll(&init.session_id)
            .await
            .expect("Poll errored");

        // Deletion runs in a spawned task, poll until the row disappears
        let mut gone = false;
        for _ in 0..50 {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            let outcome = harness
                .auth
                .pairing
                .poll(&init.session_id)
                .await
                .expect("Poll errored");
            if outcome == PollOutcome::Expired {
                gone = true;
                break;
            }
        }
        assert!(gone, "Completed session was never cleaned up");
    }

    // ==================== Sweeper ====================

    /// Test that the sweeper removes only lapsed sessions
    #[tokio::test]
    async fn test_sweep_expired_sessions() {
        let harness = TestAuth::new().await;

        let stale = "2d".repeat(32);
        harness
            .storage
            .db()
            .insert_cli_session(&stale, chrono::Utc::now() - chrono::Duration::minutes(1))
            .await
            .expect("Insert failed");
        let fresh = harness.auth.pairing.init().await.expect("Init failed");

        let removed = harness
            .auth
            .pairing
            .sweep_expired()
            .await
            .expect("Sweep errored");
        assert_eq!(removed, 1);

        assert!(
            harness
                .storage
                .db()
                .find_cli_session(&fresh.session_id)
                .await
                .expect("Lookup failed")
                .is_some(),
            "Live sessions must survive the sweep"
        );
    }
}
