use crate::api_client::ApiClient;
use crate::error::ApiResult;
use inkpost_common::api::User;
use reqwest::Method;
use uuid::Uuid;

#[derive(Clone)]
pub struct UsersClient {
    api: ApiClient,
}

impl UsersClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.api.enveloped(Method::GET, "/users", |b| b).await
    }

    pub async fn by_id(&self, id: Uuid) -> ApiResult<User> {
        self.api
            .enveloped(Method::GET, &format!("/users/id/{id}"), |b| b)
            .await
    }

    pub async fn me(&self) -> ApiResult<User> {
        self.api.enveloped(Method::GET, "/users/me", |b| b).await
    }
}
