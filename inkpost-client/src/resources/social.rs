//! Likes and comments. These endpoints answer with bare JSON, no envelope.

use crate::api_client::{ApiClient, PageQuery};
use crate::error::ApiResult;
use crate::validation::Validate;
use inkpost_common::api::{Comment, CommentRequest, LikeStatus, PageResponse};
use reqwest::Method;
use uuid::Uuid;

#[derive(Clone)]
pub struct SocialClient {
    api: ApiClient,
}

impl SocialClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The backend decides the new state and returns it.
    pub async fn toggle_like(&self, post_id: Uuid) -> ApiResult<LikeStatus> {
        self.api
            .bare(Method::POST, &format!("/posts/{post_id}/likes"), |b| {
                b.json(&serde_json::json!({}))
            })
            .await
    }

    pub async fn like_status(&self, post_id: Uuid) -> ApiResult<LikeStatus> {
        self.api
            .bare(Method::GET, &format!("/posts/{post_id}/likes/status"), |b| b)
            .await
    }

    pub async fn create_comment(&self, post_id: Uuid, req: &CommentRequest) -> ApiResult<Comment> {
        req.validate()?;
        self.api
            .bare(Method::POST, &format!("/posts/{post_id}/comments"), |b| {
                b.json(req)
            })
            .await
    }

    pub async fn comments(&self, post_id: Uuid, page: PageQuery) -> ApiResult<PageResponse<Comment>> {
        self.api
            .bare(Method::GET, &format!("/posts/{post_id}/comments"), |b| {
                page.apply(b)
            })
            .await
    }

    pub async fn user_comments(
        &self,
        user_id: Uuid,
        page: PageQuery,
    ) -> ApiResult<PageResponse<Comment>> {
        self.api
            .bare(Method::GET, &format!("/comments/user/{user_id}"), |b| {
                page.apply(b)
            })
            .await
    }

    pub async fn update_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        req: &CommentRequest,
    ) -> ApiResult<Comment> {
        req.validate()?;
        self.api
            .bare(
                Method::PUT,
                &format!("/posts/{post_id}/comments/{comment_id}"),
                |b| b.json(req),
            )
            .await
    }

    pub async fn delete_comment(&self, post_id: Uuid, comment_id: Uuid) -> ApiResult<()> {
        self.api
            .no_content(
                Method::DELETE,
                &format!("/posts/{post_id}/comments/{comment_id}"),
                |b| b,
            )
            .await
    }
}
