//! Error handling integration tests
//!
//! Verifies how [`ApiError`] crosses the HTTP boundary: status codes,
//! response envelopes, masking of internal details, and the From
//! conversions used with the ? operator.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use chrono::Utc;
    use lynxprompt_rs::utils::error::{ApiError, Result};

    async fn body_json(error: ApiError) -> serde_json::Value {
        let response = error.error_response();
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("collect response body");
        serde_json::from_slice(&bytes).expect("parse response body")
    }

    // ==================== Status codes ====================

    /// Test the HTTP status for every error family
    #[test]
    fn test_http_status_mapping() {
        let cases = [
            (ApiError::auth("bad token"), 401),
            (ApiError::token_expired(Utc::now()), 401),
            (ApiError::session("stale"), 401),
            (ApiError::forbidden("role"), 403),
            (ApiError::validation("name"), 400),
            (ApiError::bad_request("body"), 400),
            (ApiError::not_found("token"), 404),
            (ApiError::conflict("already revoked"), 409),
            (ApiError::gone("pairing session"), 410),
            (ApiError::rate_limit("slow down"), 429),
            (ApiError::Config("bad yaml".to_string()), 500),
            (ApiError::crypto("rng"), 500),
            (ApiError::internal("boom"), 500),
        ];

        for (error, expected) in cases {
            assert_eq!(
                error.status_code().as_u16(),
                expected,
                "wrong status for {:?}",
                error
            );
        }
    }

    // ==================== Response envelope ====================

    /// Test the envelope shape for a client-facing error
    #[tokio::test]
    async fn test_error_envelope_shape() {
        let body = body_json(ApiError::validation("Token name must not be empty")).await;

        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Validation error: Token name must not be empty"
        );
        assert!(body["error"]["timestamp"].is_i64());
        assert!(body["error"].get("expired_at").is_none());
        assert!(body["error"].get("request_id").is_none());
    }

    /// Test the code assigned to each client-facing variant
    #[tokio::test]
    async fn test_error_codes() {
        let cases = [
            (ApiError::auth("no"), "AUTH_ERROR"),
            (ApiError::session("no"), "SESSION_ERROR"),
            (ApiError::forbidden("no"), "FORBIDDEN"),
            (ApiError::bad_request("no"), "BAD_REQUEST"),
            (ApiError::not_found("no"), "NOT_FOUND"),
            (ApiError::conflict("no"), "CONFLICT"),
            (ApiError::gone("no"), "GONE"),
            (ApiError::rate_limit("no"), "RATE_LIMIT_EXCEEDED"),
            (ApiError::Config("no".to_string()), "CONFIG_ERROR"),
        ];

        for (error, expected) in cases {
            let body = body_json(error).await;
            assert_eq!(body["error"]["code"], expected);
        }
    }

    /// Test that an expired token response carries the expiry
    #[tokio::test]
    async fn test_token_expired_envelope() {
        let when = Utc::now();
        let body = body_json(ApiError::token_expired(when)).await;

        assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
        assert_eq!(body["error"]["message"], "API token has expired");

        let reported: chrono::DateTime<Utc> =
            serde_json::from_value(body["error"]["expired_at"].clone())
                .expect("expired_at should be a timestamp");
        assert_eq!(reported, when);
    }

    // ==================== Masking ====================

    /// Test that database details never reach the response body
    #[tokio::test]
    async fn test_database_details_are_masked() {
        let error = ApiError::Database(sea_orm::DbErr::Custom(
            "connection to postgres://admin:hunter2@db failed".to_string(),
        ));
        let body = body_json(error).await;

        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        assert_eq!(body["error"]["message"], "Database operation failed");
        assert!(!body.to_string().contains("hunter2"));
    }

    /// Test that internal variants share one opaque message
    #[tokio::test]
    async fn test_internal_details_are_masked() {
        for error in [
            ApiError::crypto("rng returned short read"),
            ApiError::Migration("m20250101 failed".to_string()),
            ApiError::internal("poisoned lock"),
        ] {
            let body = body_json(error).await;
            assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
            assert_eq!(body["error"]["message"], "An internal error occurred");
        }
    }

    // ==================== Conversions ====================

    /// Test the From conversions used with the ? operator
    #[test]
    fn test_from_conversions() {
        fn parse_json() -> Result<serde_json::Value> {
            Ok(serde_json::from_str("{ not json")?)
        }
        assert!(matches!(
            parse_json().expect_err("bad json"),
            ApiError::Serialization(_)
        ));

        fn parse_yaml() -> Result<u64> {
            Ok(serde_yaml::from_str("not-a-number")?)
        }
        assert!(matches!(
            parse_yaml().expect_err("bad yaml"),
            ApiError::Yaml(_)
        ));

        fn read_missing() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?
        }
        assert!(matches!(
            read_missing().expect_err("io failure"),
            ApiError::Io(_)
        ));

        fn db_failure() -> Result<()> {
            Err(sea_orm::DbErr::Custom("constraint".to_string()))?
        }
        assert!(matches!(
            db_failure().expect_err("db failure"),
            ApiError::Database(_)
        ));
    }

    // ==================== Display ====================

    /// Test the Display prefixes clients see in messages
    #[test]
    fn test_display_formats() {
        assert_eq!(
            ApiError::auth("invalid token").to_string(),
            "Authentication error: invalid token"
        );
        assert_eq!(
            ApiError::gone("CLI session expired").to_string(),
            "Gone: CLI session expired"
        );
        assert_eq!(
            ApiError::conflict("Token is already revoked").to_string(),
            "Conflict: Token is already revoked"
        );

        let when = Utc::now();
        assert!(ApiError::token_expired(when)
            .to_string()
            .starts_with("Token expired at"));
    }
}
