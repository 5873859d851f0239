//! Configuration validation integration tests
//!
//! Exercises the [`Config`] facade: file and environment loading, merge
//! precedence, and validation across every section.

#[cfg(test)]
mod tests {
    use lynxprompt_rs::config::Config;
    use lynxprompt_rs::utils::error::ApiError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_error(result: lynxprompt_rs::utils::error::Result<()>) -> String {
        match result.expect_err("validation should fail") {
            ApiError::Config(msg) => msg,
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    // ==================== Validation ====================

    /// Test that the default config is valid
    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server().host, "0.0.0.0");
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.auth().max_tokens_per_user, 10);
        assert_eq!(config.pairing().session_ttl_secs, 300);
        assert!(!config.rate_limit().enabled);
    }

    /// Test that model errors surface through the facade
    #[test]
    fn test_validate_wraps_model_errors() {
        let mut config = Config::default();
        config.app.server.port = 0;

        let msg = config_error(config.validate());
        assert!(msg.starts_with("Config error:"));
        assert!(msg.contains("Port cannot be 0"));
    }

    /// Test that validation reaches every configuration section
    #[test]
    fn test_validate_covers_every_section() {
        let mut config = Config::default();
        config.app.auth.min_password_len = 4;
        assert!(config_error(config.validate()).contains("Minimum password length"));

        let mut config = Config::default();
        config.app.pairing.session_ttl_secs = 0;
        assert!(config_error(config.validate()).contains("Pairing session TTL"));

        let mut config = Config::default();
        config.app.storage.database.max_connections = 0;
        assert!(config_error(config.validate()).contains("Max connections"));

        let mut config = Config::default();
        config.app.rate_limit.enabled = true;
        config.app.rate_limit.max_requests = 0;
        assert!(config_error(config.validate()).contains("at least one request"));

        let mut config = Config::default();
        config.app.server.cors.allowed_origins = vec!["*".to_string()];
        config.app.server.cors.allow_credentials = true;
        assert!(config_error(config.validate()).contains("credentials"));
    }

    /// Test that a disabled rate limiter skips its bounds checks
    #[test]
    fn test_disabled_rate_limit_is_not_validated() {
        let mut config = Config::default();
        config.app.rate_limit.enabled = false;
        config.app.rate_limit.max_requests = 0;
        assert!(config.validate().is_ok());
    }

    // ==================== File loading ====================

    /// Test a YAML round trip through to_yaml and from_file
    #[tokio::test]
    async fn test_yaml_round_trip() {
        let mut config = Config::default();
        config.app.server.port = 9191;
        config.app.auth.max_tokens_per_user = 3;
        config.app.pairing.auth_page_url = "https://pair.example.com/cli-auth".to_string();

        let yaml = config.to_yaml().expect("serialize config");
        let mut temp_file = NamedTempFile::new().expect("create temp file");
        temp_file.write_all(yaml.as_bytes()).expect("write config");

        let reloaded = Config::from_file(temp_file.path())
            .await
            .expect("reload config");
        assert_eq!(reloaded.server().port, 9191);
        assert_eq!(reloaded.auth().max_tokens_per_user, 3);
        assert_eq!(
            reloaded.pairing().auth_page_url,
            "https://pair.example.com/cli-auth"
        );
    }

    /// Test that from_file validates what it loads
    #[tokio::test]
    async fn test_from_file_rejects_invalid_values() {
        let mut temp_file = NamedTempFile::new().expect("create temp file");
        temp_file
            .write_all(b"server:\n  port: 0\n")
            .expect("write config");

        let err = Config::from_file(temp_file.path())
            .await
            .expect_err("invalid port should be rejected");
        match err {
            ApiError::Config(msg) => assert!(msg.contains("Port cannot be 0")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    /// Test the error for a missing config file
    #[tokio::test]
    async fn test_from_file_missing_file() {
        let err = Config::from_file("/nonexistent/lynxprompt.yaml")
            .await
            .expect_err("missing file should be rejected");
        match err {
            ApiError::Config(msg) => assert!(msg.contains("Failed to read config file")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    /// Test that unlisted sections fall back to defaults
    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().expect("create temp file");
        temp_file
            .write_all(b"server:\n  port: 9000\n")
            .expect("write config");

        let config = Config::from_file(temp_file.path())
            .await
            .expect("partial config should load");
        assert_eq!(config.server().port, 9000);
        assert_eq!(config.auth().max_tokens_per_user, 10);
        assert_eq!(config.storage().database.url, "postgresql://localhost/lynxprompt");
    }

    // ==================== Environment loading ====================

    /// Test environment overrides, including the invalid-port error
    #[test]
    fn test_from_env_overrides() {
        unsafe {
            std::env::set_var("DATABASE_URL", "sqlite://env.db");
            std::env::set_var("LYNXPROMPT_HOST", "127.0.0.1");
            std::env::set_var("LYNXPROMPT_PORT", "9555");
            std::env::set_var("LYNXPROMPT_AUTH_PAGE_URL", "https://env.example.com/cli-auth");
        }

        let config = Config::from_env().expect("env config should load");
        assert_eq!(config.storage().database.url, "sqlite://env.db");
        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.server().port, 9555);
        assert_eq!(config.pairing().auth_page_url, "https://env.example.com/cli-auth");

        unsafe { std::env::set_var("LYNXPROMPT_PORT", "not-a-port") };
        let err = Config::from_env().expect_err("bad port should be rejected");
        match err {
            ApiError::Config(msg) => assert!(msg.contains("not a valid port")),
            other => panic!("expected Config error, got {:?}", other),
        }

        unsafe {
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("LYNXPROMPT_HOST");
            std::env::remove_var("LYNXPROMPT_PORT");
            std::env::remove_var("LYNXPROMPT_AUTH_PAGE_URL");
        }
    }

    // ==================== Merge ====================

    /// Test that non-default override fields win a merge
    #[test]
    fn test_merge_prefers_overrides() {
        let mut base = Config::default();
        base.app.server.host = "10.0.0.1".to_string();
        base.app.auth.max_tokens_per_user = 5;

        let mut overrides = Config::default();
        overrides.app.server.port = 9000;
        overrides.app.rate_limit.enabled = true;
        overrides.app.rate_limit.max_requests = 30;

        let merged = base.merge(overrides);
        assert_eq!(merged.server().host, "10.0.0.1");
        assert_eq!(merged.server().port, 9000);
        assert_eq!(merged.auth().max_tokens_per_user, 5);
        assert!(merged.rate_limit().enabled);
        assert_eq!(merged.rate_limit().max_requests, 30);
    }

    /// Test that merging a default config changes nothing
    #[test]
    fn test_merge_with_default_is_identity() {
        let mut base = Config::default();
        base.app.server.port = 9000;
        base.app.pairing.session_ttl_secs = 120;

        let merged = base.merge(Config::default());
        assert_eq!(merged.server().port, 9000);
        assert_eq!(merged.pairing().session_ttl_secs, 120);
    }

    // ==================== Serialization ====================

    /// Test that the JSON rendering names every section
    #[test]
    fn test_to_json_lists_sections() {
        let json = Config::default().to_json().expect("serialize config");
        for section in ["server", "storage", "auth", "pairing", "rate_limit"] {
            assert!(json.contains(section), "missing section {}", section);
        }
    }
}
