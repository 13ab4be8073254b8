#[cfg(test)]
mod tests {
    use super::super::error::LexvaultError;

    #[test]
    fn test_no_api_key_error() {
        let error = LexvaultError::NoApiKey;

        let msg = error.to_string();
        assert!(msg.contains("API key not configured"));
        assert!(msg.contains("~/.lexvault/config.yaml"));

        // Check hint is provided
        let hint = error.hint();
        assert!(hint.is_some());
        let hint_text = hint.unwrap();
        assert!(hint_text.contains("LEXVAULT_API_KEY"));
        assert!(hint_text.contains("with_api_key"));
    }

    #[test]
    fn test_api_error_with_hint() {
        let error = LexvaultError::api_error(
            "422",
            "query must not be empty",
            Some("Pass a non-empty query".to_string()),
        );

        let msg = error.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("query must not be empty"));

        // Custom hint is preserved
        assert_eq!(error.hint().unwrap(), "Pass a non-empty query");
    }

    #[test]
    fn test_api_error_without_hint() {
        let error = LexvaultError::api_error("400", "bad request", None);
        assert!(error.hint().is_none());
    }

    #[test]
    fn test_rate_limit_error() {
        let error = LexvaultError::RateLimit;

        assert_eq!(error.to_string(), "Rate limit exceeded. Please try again later.");
        let hint_text = error.hint().unwrap();
        assert!(hint_text.contains("too many requests"));
    }

    #[test]
    fn test_missing_field_error() {
        let error = LexvaultError::MissingField {
            field: "title".to_string(),
        };

        assert_eq!(error.to_string(), "Missing required field `title`");
        assert!(error.is_decode_error());
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_type_mismatch_error() {
        let source = serde_json::from_str::<u32>("\"seven\"").unwrap_err();
        let error = LexvaultError::TypeMismatch {
            field: "numResults".to_string(),
            source,
        };

        let msg = error.to_string();
        assert!(msg.contains("`numResults`"));
        assert!(error.is_decode_error());
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_enum_value_error() {
        let error = LexvaultError::InvalidEnumValue {
            field: "status".to_string(),
            value: "\"quantum\"".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Invalid enum value \"quantum\" for field `status`"
        );
        assert!(error.hint().unwrap().contains("ApiEnum::raw"));
    }

    #[test]
    fn test_frozen_error() {
        let error = LexvaultError::Frozen {
            key: "name".to_string(),
        };

        assert_eq!(error.to_string(), "Cannot set `name`: the store is frozen");
        assert!(error.hint().unwrap().contains("to_builder()"));
        assert!(!error.is_decode_error());
    }

    #[test]
    fn test_in_field_builds_nested_paths() {
        let error = LexvaultError::InvalidEnumValue {
            field: String::new(),
            value: "\"disputed\"".to_string(),
        };

        let error = error.in_field("status").in_field("[1]").in_field("citations");
        match error {
            LexvaultError::InvalidEnumValue { field, .. } => {
                assert_eq!(field, "citations[1].status");
            }
            other => panic!("Expected InvalidEnumValue, got {:?}", other),
        }
    }

    #[test]
    fn test_in_field_leaves_other_errors_alone() {
        let error = LexvaultError::NotFound("vault v_1".to_string()).in_field("vaults");
        assert_eq!(error.to_string(), "Not found: vault v_1");
    }

    #[test]
    fn test_server_error() {
        let error = LexvaultError::ServerError("503 Service Unavailable".to_string());

        let msg = error.to_string();
        assert!(msg.contains("Server error"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error = LexvaultError::from(io_error);

        assert!(matches!(error, LexvaultError::Io(_)));
        assert!(error.to_string().contains("Permission denied"));
    }

    #[test]
    fn test_config_error() {
        let error = LexvaultError::Config("Invalid configuration format".to_string());

        let msg = error.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("Invalid configuration format"));
    }

    #[test]
    fn test_authentication_failed() {
        let error = LexvaultError::AuthenticationFailed("Invalid API key".to_string());

        let msg = error.to_string();
        assert!(msg.contains("Authentication failed"));
        assert!(msg.contains("Invalid API key"));

        let hint_text = error.hint().unwrap();
        assert!(hint_text.contains("API key"));
    }

    #[test]
    fn test_is_retryable() {
        // reqwest::Error can't be built directly here; Network is covered
        // by the integration tests
        assert!(LexvaultError::ServerError("503".to_string()).is_retryable());
        assert!(LexvaultError::RateLimit.is_retryable());

        // Non-retryable errors
        assert!(!LexvaultError::NoApiKey.is_retryable());
        assert!(!LexvaultError::InvalidInput("bad input".to_string()).is_retryable());
        assert!(!LexvaultError::AuthenticationFailed("bad key".to_string()).is_retryable());
        assert!(!LexvaultError::NotFound("missing".to_string()).is_retryable());
    }

    #[test]
    fn test_serialization_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error = LexvaultError::from(json_error);

        assert!(error.to_string().starts_with("Serialization error"));
        assert!(!error.is_decode_error());
    }

    #[test]
    fn test_url_error() {
        let parse_error = url::Url::parse("not a url").unwrap_err();
        let error = LexvaultError::from(parse_error);

        assert!(error.to_string().contains("Invalid URL"));
    }
}
