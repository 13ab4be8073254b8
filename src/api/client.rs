use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use super::http_client::ReqwestTransport;
use super::legal::LegalService;
use super::search::SearchService;
use super::vault::VaultService;
use crate::config::ClientOptions;
use crate::error::{LexvaultError, Result};
use crate::model::{FrozenStore, Model, Params};

/// A rendered request, ready for a [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Status, headers and body returned by a [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

/// Trait for sending a rendered request over the wire
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Entry point of the SDK
#[derive(Clone)]
pub struct LexvaultClient {
    options: ClientOptions,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for LexvaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexvaultClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl LexvaultClient {
    /// Create a client backed by the default reqwest transport
    pub fn new(options: ClientOptions) -> Result<Self> {
        let transport = ReqwestTransport::new(&options)?;
        Ok(Self::with_transport(options, Arc::new(transport)))
    }

    pub fn with_transport(options: ClientOptions, transport: Arc<dyn Transport>) -> Self {
        Self { options, transport }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn legal(&self) -> LegalService<'_> {
        LegalService::new(self)
    }

    pub fn search(&self) -> SearchService<'_> {
        SearchService::new(self)
    }

    pub fn vault(&self) -> VaultService<'_> {
        VaultService::new(self)
    }

    /// Render params into a request without sending it
    pub fn prepare<P: Params>(&self, params: &P) -> Result<HttpRequest> {
        self.options.require_api_key(params.service())?;

        Ok(HttpRequest {
            method: params.method(),
            url: params.url(&self.options)?,
            headers: params.headers(&self.options)?,
            body: params.body_content()?,
        })
    }

    /// Send params and wrap the response body in the endpoint's model
    pub async fn execute<P: Params>(&self, params: &P) -> Result<P::Response> {
        let request = self.prepare(params)?;
        debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await?;
        debug!("Response status {} ({} bytes)", response.status, response.body.len());

        parse_response(response)
    }
}

/// Map a transport response to a model or an error
pub fn parse_response<M: Model>(response: HttpResponse) -> Result<M> {
    if !response.is_success() {
        return Err(status_error(&response));
    }

    let text = String::from_utf8_lossy(&response.body);
    let trimmed = text.trim();

    // DELETE-style endpoints may answer with an empty body
    if trimmed.is_empty() {
        return Ok(M::from_store(FrozenStore::default()));
    }

    // HTML usually means a proxy or login page answered instead of the API
    if response.content_type().contains("text/html") || trimmed.starts_with('<') {
        return Err(LexvaultError::ApiError {
            code: "INVALID_RESPONSE".to_string(),
            message: "API returned HTML instead of JSON.".to_string(),
            hint: Some("Check the configured base URL and API key.".to_string()),
        });
    }

    M::from_json(trimmed.as_bytes()).map_err(|e| match e {
        LexvaultError::Serialization(err) => LexvaultError::ApiError {
            code: "INVALID_RESPONSE".to_string(),
            message: format!(
                "Failed to parse API response as a JSON object: {}. Response starts with: {}",
                err,
                trimmed.chars().take(100).collect::<String>()
            ),
            hint: None,
        },
        other => other,
    })
}

fn status_error(response: &HttpResponse) -> LexvaultError {
    let status = response.status;
    let message = error_message(&response.body)
        .unwrap_or_else(|| format!("API request failed with status {}", status));
    warn!("API request failed with status {}: {}", status, message);

    match status {
        401 | 403 => LexvaultError::AuthenticationFailed(message),
        404 => LexvaultError::NotFound(message),
        429 => LexvaultError::RateLimit,
        500..=599 => LexvaultError::ServerError(format!("Server returned status {}: {}", status, message)),
        _ => LexvaultError::ApiError {
            code: status.to_string(),
            message,
            hint: None,
        },
    }
}

/// Pull a human-readable message out of a JSON error body
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let field = |v: &Value| -> Option<String> {
        ["message", "error", "detail"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
    };
    field(&value).or_else(|| value.get("error").and_then(field))
}
