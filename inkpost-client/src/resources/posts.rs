use crate::api_client::{ApiClient, PageQuery};
use crate::error::ApiResult;
use crate::validation::Validate;
use inkpost_common::api::{PageResponse, Post, PostRequest};
use reqwest::Method;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostsClient {
    api: ApiClient,
}

impl PostsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, page: PageQuery) -> ApiResult<PageResponse<Post>> {
        self.api
            .enveloped(Method::GET, "/posts", |b| page.apply(b))
            .await
    }

    pub async fn by_user(&self, user_id: Uuid, page: PageQuery) -> ApiResult<PageResponse<Post>> {
        self.api
            .enveloped(Method::GET, &format!("/posts/user/{user_id}"), |b| {
                page.apply(b)
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<Post> {
        self.api
            .enveloped(Method::GET, &format!("/posts/{id}"), |b| b)
            .await
    }

    pub async fn create(&self, req: &PostRequest) -> ApiResult<Post> {
        req.validate()?;
        self.api
            .enveloped(Method::POST, "/posts", |b| b.json(req))
            .await
    }

    pub async fn update(&self, id: Uuid, req: &PostRequest) -> ApiResult<Post> {
        req.validate()?;
        self.api
            .enveloped(Method::PUT, &format!("/posts/{id}"), |b| b.json(req))
            .await
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        self.api
            .enveloped_ack(Method::DELETE, &format!("/posts/{id}"), |b| b)
            .await?;
        Ok(())
    }
}
