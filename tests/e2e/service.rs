//! E2E tests against a running LynxPrompt service
//!
//! These tests make real HTTP calls and require a live service.
//! Run with: LYNXPROMPT_URL=http://localhost:8080 cargo test -- --ignored

#[cfg(test)]
mod tests {
    use lynxprompt_rs::sdk::{CliAuthPoll, LynxClient};
    use uuid::Uuid;

    fn service_url() -> String {
        std::env::var("LYNXPROMPT_URL").expect("LYNXPROMPT_URL is checked before this")
    }

    /// E2E test for the health endpoint
    #[tokio::test]
    #[ignore]
    async fn test_service_health() {
        crate::skip_without_env!("LYNXPROMPT_URL");

        let client = LynxClient::new(&service_url()).expect("Failed to build client");
        let health = client.health().await.expect("Health request failed");

        assert!(!health.status.is_empty());
        assert!(!health.database.is_empty());
        assert!(!health.version.is_empty());
    }

    /// E2E test for the pairing handshake up to the browser step
    #[tokio::test]
    #[ignore]
    async fn test_pairing_handshake_stays_pending() {
        crate::skip_without_env!("LYNXPROMPT_URL");

        let client = LynxClient::new(&service_url()).expect("Failed to build client");
        let init = client.init_cli_auth().await.expect("Init request failed");

        assert_eq!(init.session_id.len(), 64);
        assert!(init.auth_url.contains(&init.session_id));

        // Nobody opens the auth page, so the session stays pending.
        let poll = client
            .poll_cli_auth(&init.session_id)
            .await
            .expect("Poll request failed");
        assert_eq!(poll, CliAuthPoll::Pending);
    }

    /// E2E test that an unknown session polls as expired
    #[tokio::test]
    #[ignore]
    async fn test_unknown_session_polls_expired() {
        crate::skip_without_env!("LYNXPROMPT_URL");

        let fabricated = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let client = LynxClient::new(&service_url()).expect("Failed to build client");
        let poll = client
            .poll_cli_auth(&fabricated)
            .await
            .expect("Poll request failed");
        assert_eq!(poll, CliAuthPoll::Expired);
    }

    /// E2E test for authenticated endpoints
    #[tokio::test]
    #[ignore]
    async fn test_authenticated_flows() {
        crate::skip_without_env!("LYNXPROMPT_URL");
        crate::skip_without_env!("LYNXPROMPT_TOKEN");

        let token = std::env::var("LYNXPROMPT_TOKEN").expect("checked above");
        let client = LynxClient::new(&service_url())
            .expect("Failed to build client")
            .with_token(token);

        let profile = client.current_user().await.expect("Profile request failed");
        assert!(!profile.email.is_empty());

        // The listing mixes own and public blueprints, so only shape is checked.
        let blueprints = client
            .list_blueprints()
            .await
            .expect("Blueprint listing failed");
        for blueprint in &blueprints {
            assert!(!blueprint.slug.is_empty());
        }
    }
}
