//! HTTP API client for the users backend
//!
//! One method per operation. Each call builds its own request descriptor,
//! sends exactly one request and returns the decoded body or the error.
//! The client keeps no per-call state, so a single instance (or clones of
//! it) can serve any number of concurrent calls.

use crate::api::endpoints;
use crate::api::error::{ApiError, Result, ServerErrorDetail};
use crate::api::payload::{ProfileUpdate, RequestBody, RequestDescriptor};
use crate::api::tap::{self, Reply};
use crate::api::types::{to_payload, Payload, User, UserId, UserProfile};
use crate::config::ClientConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// API client for the users backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    default_headers: HeaderMap,
    normalize: bool,
    tap: bool,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::setup(e.to_string()))?;

        Self::with_http_client(http, config)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(http: Client, config: &ClientConfig) -> Result<Self> {
        check_server_url(&config.server_url)?;

        Ok(Self {
            http,
            base_url: endpoints::base_url(&config.server_url, &config.api_prefix),
            default_headers: header_map(&config.default_headers)?,
            normalize: config.normalize_empty_strings,
            tap: config.log_responses,
        })
    }

    /// List users; `query` is forwarded as query parameters
    pub async fn list_users(&self, query: Option<Payload>) -> Result<Vec<User>> {
        let mut request = RequestDescriptor::new(Method::GET, endpoints::users_path());
        if let Some(query) = query {
            request = request.query(query);
        }
        self.fetch(request).await
    }

    /// Get a single user
    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        self.fetch(RequestDescriptor::new(Method::GET, endpoints::user_path(id)))
            .await
    }

    /// Create a user
    pub async fn create_user<T: Serialize + ?Sized>(&self, data: &T) -> Result<User> {
        let request =
            RequestDescriptor::new(Method::POST, endpoints::users_path()).json(to_payload(data)?);
        self.fetch(request).await
    }

    /// Replace the fields of a user
    pub async fn update_user<T: Serialize + ?Sized>(&self, id: &UserId, data: &T) -> Result<User> {
        let request =
            RequestDescriptor::new(Method::PUT, endpoints::user_path(id)).json(to_payload(data)?);
        self.fetch(request).await
    }

    /// Delete a user
    ///
    /// The backend answers 204 with a confirmation body; the body is ignored.
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        self.execute(RequestDescriptor::new(Method::DELETE, endpoints::user_path(id)))
            .await
            .map(|_| ())
    }

    /// Get the profile of a user
    pub async fn get_user_profile(&self, id: &UserId) -> Result<UserProfile> {
        self.fetch(RequestDescriptor::new(
            Method::GET,
            endpoints::user_profile_path(id),
        ))
        .await
    }

    /// Update the profile of a user, as JSON or multipart depending on `update`
    pub async fn update_user_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile> {
        let request = RequestDescriptor::new(Method::PUT, endpoints::user_profile_path(id))
            .body(update.into_body());
        self.fetch(request).await
    }

    /// Update only the bio through the legacy endpoint
    ///
    /// Kept for older backends; the response shape is not fixed, so the raw
    /// JSON is returned.
    pub async fn update_user_bio(&self, id: &UserId, bio: &str) -> Result<Value> {
        let mut body = Payload::new();
        body.insert("bio".to_string(), json!(bio));
        let request = RequestDescriptor::new(Method::PUT, endpoints::user_bio_path(id)).json(body);
        self.fetch(request).await
    }

    /// Apply the configured request transforms to a descriptor
    pub fn prepare(&self, request: RequestDescriptor) -> RequestDescriptor {
        if self.normalize {
            request.normalized()
        } else {
            request
        }
    }

    /// Send one request and return the raw 2xx reply
    pub async fn execute(&self, request: RequestDescriptor) -> Result<Reply> {
        let request = self.prepare(request);
        let method = request.method.clone();
        let path = request.path.clone();

        let outcome = self.dispatch(request).await;

        if self.tap {
            tap::observe(&method, &path, outcome)
        } else {
            outcome
        }
    }

    /// Send one request and decode the JSON reply
    async fn fetch<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        let method = request.method.clone();
        let path = request.path.clone();

        let reply = self.execute(request).await?;

        serde_json::from_slice(&reply.body).map_err(|source| {
            let err = ApiError::Decode {
                method: method.to_string(),
                path: path.clone(),
                source,
            };
            if self.tap {
                tap::log_failure(&method, &path, &err);
            }
            err
        })
    }

    async fn dispatch(&self, request: RequestDescriptor) -> Result<Reply> {
        let query = request.query_pairs();
        let RequestDescriptor {
            method,
            path,
            body,
            headers,
            ..
        } = request;

        let mut builder = self
            .http
            .request(method.clone(), endpoints::url(&self.base_url, &path))
            .headers(self.default_headers.clone())
            .headers(headers);

        if !query.is_empty() {
            builder = builder.query(&query);
        }

        builder = match body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart { fields, attachment } => {
                builder.multipart(RequestBody::into_form(fields, attachment)?)
            }
        };

        let transport = |source: reqwest::Error| ApiError::Transport {
            method: method.to_string(),
            path: path.clone(),
            source,
        };

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?.to_vec();

        if !status.is_success() {
            return Err(ApiError::Server {
                method: method.to_string(),
                path,
                status,
                detail: ServerErrorDetail::from_body(&body),
            });
        }

        Ok(Reply { status, body })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Reject server URLs reqwest would only fail on at send time
fn check_server_url(server_url: &str) -> Result<()> {
    let invalid = || {
        ApiError::setup(format!(
            "invalid server URL '{}', expected something like http://localhost:8000",
            server_url
        ))
    };
    let url = Url::parse(server_url).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(()),
        _ => Err(invalid()),
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::setup(format!("invalid header name '{}'", name)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::setup(format!("invalid value for header '{}'", name)))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client = ApiClient::new(&ClientConfig::new("http://localhost:8000")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_invalid_default_header_is_rejected() {
        let config = ClientConfig::default().with_header("bad header", "x");
        let err = ApiClient::new(&config).unwrap_err();
        assert!(matches!(err, ApiError::Setup(_)));
    }

    #[test]
    fn test_server_url_without_scheme_is_rejected() {
        for url in ["localhost:8000", "ftp://files.example.com", "not a url"] {
            let err = ApiClient::new(&ClientConfig::new(url)).unwrap_err();
            assert!(matches!(err, ApiError::Setup(_)), "{url}: {err}");
            assert!(!err.is_transport());
        }
        assert!(ApiClient::new(&ClientConfig::new("https://users.example.com")).is_ok());
    }

    #[test]
    fn test_prepare_respects_normalize_switch() {
        let body = to_payload(&json!({"bio": ""})).unwrap();
        let request = RequestDescriptor::new(Method::POST, "/users/").json(body);

        let on = ApiClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(
            on.prepare(request.clone()).body,
            RequestBody::Json(json!({"bio": null}))
        );

        let mut config = ClientConfig::default();
        config.set_normalize_empty_strings(false);
        let off = ApiClient::new(&config).unwrap();
        assert_eq!(off.prepare(request).body, RequestBody::Json(json!({"bio": ""})));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client.get_user(&UserId::Numeric(1)).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.path(), Some("/users/1/"));
        assert!(err.status().is_none());
    }
}
