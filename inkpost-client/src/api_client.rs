//! Every request to the backend goes through [`ApiClient`].
//!
//! It attaches the bearer token of the current session and, when the backend
//! answers 401/403 (or 404 on the identity endpoints), logs the session out
//! before handing the original error back to the caller.

use crate::error::{ApiError, ApiResult};
use crate::session::{SessionStore, ACCOUNT_NOT_FOUND_NOTICE, SESSION_EXPIRED_NOTICE};
use crate::settings::Settings;
use inkpost_common::api::ApiResponse;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Zero-based page request sent as `?page=&size=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
}

impl PageQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub(crate) fn apply(self, builder: RequestBuilder) -> RequestBuilder {
        builder.query(&[("page", self.page), ("size", self.size)])
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<SessionStore>) -> ApiResult<Self> {
        Self::with_timeout(base_url, session, None)
    }

    pub fn from_settings(settings: &Settings, session: Arc<SessionStore>) -> ApiResult<Self> {
        Self::with_timeout(&settings.api_url, session, Some(settings.request_timeout()))
    }

    fn with_timeout(
        base_url: &str,
        session: Arc<SessionStore>,
        timeout: Option<Duration>,
    ) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("inkpost/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends one request and runs the authorization side effects on failure.
    ///
    /// `path` is relative to the base url and must not carry a query string;
    /// use `build` for query, body and extra headers.
    pub async fn dispatch<F>(&self, method: Method, path: &str, build: F) -> ApiResult<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let mut builder = build(self.http.request(method.clone(), self.url(path)));
        let token = self.session.token();
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }

        debug!(%method, path, authenticated = token.is_some(), "dispatching request");
        let res = builder.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = error_message(res).await;
        self.intercept(status, path);
        Err(ApiError::from_status(status, message))
    }

    fn intercept(&self, status: StatusCode, path: &str) {
        // A failed login or register leaves the current session unchanged,
        // so 401/403 from the auth endpoints never log out.
        if path.starts_with("/auth/") {
            return;
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%status, path, "authorization rejected, ending session");
            self.session.logout(Some(SESSION_EXPIRED_NOTICE));
        } else if status == StatusCode::NOT_FOUND && targets_identity(path) {
            warn!(path, "identity no longer exists, ending session");
            self.session.logout(Some(ACCOUNT_NOT_FOUND_NOTICE));
        }
    }

    /// Request whose response body is the bare resource.
    pub async fn bare<T, F>(&self, method: Method, path: &str, build: F) -> ApiResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let res = self.dispatch(method, path, build).await?;
        decode(res).await
    }

    /// Request whose response is wrapped in `{success, message, data}`.
    pub async fn enveloped<T, F>(&self, method: Method, path: &str, build: F) -> ApiResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let res = self.dispatch(method, path, build).await?;
        let status = res.status();
        let envelope: ApiResponse<T> = decode(res).await?;

        if !envelope.success {
            return Err(ApiError::Rejected {
                status,
                message: envelope.message.unwrap_or_else(|| "Request failed".into()),
            });
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Decode(format!("{path} returned no data")))
    }

    /// Enveloped request without a payload. Returns the backend's message.
    pub async fn enveloped_ack<F>(
        &self,
        method: Method,
        path: &str,
        build: F,
    ) -> ApiResult<Option<String>>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let res = self.dispatch(method, path, build).await?;
        let status = res.status();
        let envelope = decode_or_empty(res).await?;

        if !envelope.success {
            return Err(ApiError::Rejected {
                status,
                message: envelope.message.unwrap_or_else(|| "Request failed".into()),
            });
        }
        Ok(envelope.message)
    }

    /// Request whose body, if any, is irrelevant.
    pub async fn no_content<F>(&self, method: Method, path: &str, build: F) -> ApiResult<()>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        self.dispatch(method, path, build).await?;
        Ok(())
    }
}

fn targets_identity(path: &str) -> bool {
    path.starts_with("/users/id/") || path == "/users/me"
}

async fn decode<T: DeserializeOwned>(res: Response) -> ApiResult<T> {
    let bytes = res.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn decode_or_empty(res: Response) -> ApiResult<ApiResponse<IgnoredAny>> {
    let bytes = res.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiResponse {
            success: true,
            message: None,
            data: None,
        });
    }
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Pulls the backend's message out of an error body, falling back to the
/// status reason.
async fn error_message(res: Response) -> String {
    let status = res.status();
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    };

    match res.bytes().await {
        Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(fallback),
        Err(_) => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_paths_are_recognised() {
        assert!(targets_identity("/users/me"));
        assert!(targets_identity("/users/id/42"));
        assert!(!targets_identity("/users"));
        assert!(!targets_identity("/users/me/posts"));
        assert!(!targets_identity("/posts/user/42"));
    }
}
