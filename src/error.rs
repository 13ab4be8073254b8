use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexvaultError {
    #[error("API key not configured. Set LEXVAULT_API_KEY or add api_key to ~/.lexvault/config.yaml.")]
    NoApiKey,

    #[error("Missing required field `{field}`")]
    MissingField { field: String },

    #[error("Field `{field}` has an unexpected shape: {source}")]
    TypeMismatch {
        field: String,
        source: serde_json::Error,
    },

    #[error("Invalid enum value {value} for field `{field}`")]
    InvalidEnumValue { field: String, value: String },

    #[error("Cannot set `{key}`: the store is frozen")]
    Frozen { key: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    ApiError {
        code: String,
        message: String,
        hint: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
}

impl LexvaultError {
    /// Create an API error with an optional hint
    pub fn api_error(code: impl Into<String>, message: impl Into<String>, hint: Option<String>) -> Self {
        Self::ApiError {
            code: code.into(),
            message: message.into(),
            hint,
        }
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NoApiKey => Some(
                "Export LEXVAULT_API_KEY=YOUR_KEY or pass the key with \
                 ClientOptions::with_api_key".to_string()
            ),
            Self::ApiError { hint, .. } => hint.clone(),
            Self::Network(_) => Some("Check your internet connection and try again.".to_string()),
            Self::RateLimit => Some("You've made too many requests. Please wait a moment.".to_string()),
            Self::AuthenticationFailed(_) => Some("Check your API key configuration.".to_string()),
            Self::InvalidEnumValue { .. } => Some(
                "The server sent a value this SDK version does not know. \
                 Upgrade the SDK or read the raw value with ApiEnum::raw".to_string()
            ),
            Self::Frozen { .. } => Some(
                "Copy the value with to_builder() and modify the copy instead.".to_string()
            ),
            _ => None,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::ServerError(_) | Self::RateLimit
        )
    }

    /// True for errors raised while decoding a model field.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::TypeMismatch { .. } | Self::InvalidEnumValue { .. }
        )
    }

    /// Prefix the field path of a decode error with `segment`.
    ///
    /// Segments starting with `[` are list indices and attach without a dot,
    /// so nested validation reports paths like `candidates[0].status`.
    pub fn in_field(self, segment: &str) -> Self {
        match self {
            Self::MissingField { field } => Self::MissingField {
                field: join_field_path(segment, &field),
            },
            Self::TypeMismatch { field, source } => Self::TypeMismatch {
                field: join_field_path(segment, &field),
                source,
            },
            Self::InvalidEnumValue { field, value } => Self::InvalidEnumValue {
                field: join_field_path(segment, &field),
                value,
            },
            other => other,
        }
    }
}

fn join_field_path(parent: &str, child: &str) -> String {
    if child.is_empty() {
        parent.to_string()
    } else if child.starts_with('[') {
        format!("{}{}", parent, child)
    } else {
        format!("{}.{}", parent, child)
    }
}

pub type Result<T> = std::result::Result<T, LexvaultError>;
