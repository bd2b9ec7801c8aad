use crate::api_client::ApiClient;
use crate::error::ApiResult;
use crate::session::Session;
use crate::validation::Validate;
use inkpost_common::api::{LoginRequest, RegisterRequest};
use reqwest::Method;

#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Logs in and makes the returned identity the current session. On any
    /// failure the current session is left as it was.
    pub async fn login(&self, req: &LoginRequest) -> ApiResult<Session> {
        req.validate()?;
        let session: Session = self
            .api
            .enveloped(Method::POST, "/auth/login", |b| b.json(req))
            .await?;
        self.api.session().establish(session.clone())?;
        Ok(session)
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<Session> {
        req.validate()?;
        let session: Session = self
            .api
            .enveloped(Method::POST, "/auth/register", |b| b.json(req))
            .await?;
        self.api.session().establish(session.clone())?;
        Ok(session)
    }

    pub fn logout(&self, reason: Option<&str>) -> bool {
        self.api.session().logout(reason)
    }
}
