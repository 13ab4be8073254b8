//! Request parameters split into header, query and body partitions.
//!
//! Path parameters are plain typed fields on each params struct and never
//! enter the raw maps; they are pushed onto the URL as encoded segments.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use super::store::{FrozenStore, RawMap};
use super::Model;
use crate::api::Service;
use crate::config::ClientOptions;
use crate::error::{LexvaultError, Result};

/// Header carrying the SDK version on every request.
pub const VERSION_HEADER: &str = "X-Lexvault-Version";

/// A fully built request for one endpoint.
pub trait Params {
    type Response: Model;

    fn method(&self) -> Method;

    fn service(&self) -> Service;

    /// Path segments after `{service}/v{n}`, already interpolated.
    fn path_segments(&self) -> Vec<String>;

    fn header_store(&self) -> &FrozenStore;

    fn query_store(&self) -> &FrozenStore;

    fn body_store(&self) -> &FrozenStore;

    fn url(&self, options: &ClientOptions) -> Result<Url> {
        let service = self.service();
        build_url(
            options.base_url_for(service)?,
            service,
            &self.path_segments(),
            self.query_store().as_map(),
        )
    }

    fn body_content(&self) -> Result<Option<Vec<u8>>> {
        if !sends_body(&self.method(), self.body_store()) {
            return Ok(None);
        }
        Ok(Some(serde_json::to_vec(self.body_store())?))
    }

    fn headers(&self, options: &ClientOptions) -> Result<HeaderMap> {
        let has_body = sends_body(&self.method(), self.body_store());
        render_headers(options, self.service(), self.header_store().as_map(), has_body)
    }
}

/// `{base}/{service}/{version}/{segments...}?{query}`
pub fn build_url(mut base: Url, service: Service, segments: &[String], query: &RawMap) -> Result<Url> {
    {
        let mut path = base.path_segments_mut().map_err(|_| {
            LexvaultError::InvalidInput("Base URL cannot carry path segments".to_string())
        })?;
        path.pop_if_empty();
        path.push(service.as_str());
        path.push(service.version());
        for segment in segments {
            path.push(segment);
        }
    }

    let pairs = query_pairs(query);
    if !pairs.is_empty() {
        let mut serializer = base.query_pairs_mut();
        for (key, value) in &pairs {
            serializer.append_pair(key, value);
        }
    }

    Ok(base)
}

/// Flatten a query map into `(key, value)` pairs.
///
/// Arrays repeat the key, objects nest as `key[field]`, nulls are dropped.
pub fn query_pairs(query: &RawMap) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in query {
        flatten_query(key, value, &mut pairs);
    }
    pairs
}

fn flatten_query(key: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(text) => pairs.push((key.to_string(), text.clone())),
        Value::Bool(flag) => pairs.push((key.to_string(), flag.to_string())),
        Value::Number(number) => pairs.push((key.to_string(), number.to_string())),
        Value::Array(items) => {
            for item in items {
                flatten_query(key, item, pairs);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                flatten_query(&format!("{}[{}]", key, field), item, pairs);
            }
        }
    }
}

fn sends_body(method: &Method, body: &FrozenStore) -> bool {
    if *method == Method::GET || *method == Method::HEAD {
        false
    } else if *method == Method::POST || *method == Method::PUT || *method == Method::PATCH {
        true
    } else {
        !body.as_map().is_empty()
    }
}

/// SDK defaults, then configured defaults, then per-request overrides.
///
/// A per-request header set to JSON `null` removes the header.
pub fn render_headers(
    options: &ClientOptions,
    service: Service,
    overrides: &RawMap,
    has_body: bool,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value(USER_AGENT.as_str(), &options.user_agent)?);
    headers.insert(
        HeaderName::from_static("x-lexvault-version"),
        HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
    );
    if has_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    if let Some(api_key) = options.api_key_for(service) {
        let mut value = header_value(AUTHORIZATION.as_str(), &format!("Bearer {}", api_key))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    for (name, value) in &options.default_headers {
        headers.insert(header_name(name)?, header_value(name, value)?);
    }

    for (name, value) in overrides {
        let key = header_name(name)?;
        match value {
            Value::Null => {
                headers.remove(&key);
            }
            other => {
                headers.insert(key, header_value(name, &header_text(other))?);
            }
        }
    }

    Ok(headers)
}

fn header_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(header_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| LexvaultError::InvalidInput(format!("Invalid header name '{}'", name)))
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| LexvaultError::InvalidInput(format!("Invalid value for header '{}'", name)))
}
