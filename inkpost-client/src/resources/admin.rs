//! Moderation endpoints. The backend only serves these to admins.

use crate::api_client::{ApiClient, PageQuery};
use crate::error::ApiResult;
use inkpost_common::api::{AdminNoteRequest, Analytics, PageResponse, PostAdmin, Report, UserAdmin};
use reqwest::Method;
use uuid::Uuid;

#[derive(Clone)]
pub struct AdminClient {
    api: ApiClient,
}

impl AdminClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn analytics(&self) -> ApiResult<Analytics> {
        self.api
            .enveloped(Method::GET, "/admin/analytics", |b| b)
            .await
    }

    pub async fn users(&self, page: PageQuery) -> ApiResult<PageResponse<UserAdmin>> {
        self.api
            .enveloped(Method::GET, "/admin/users", |b| page.apply(b))
            .await
    }

    pub async fn ban_user(&self, user_id: Uuid) -> ApiResult<Option<String>> {
        self.ack(Method::POST, &format!("/admin/users/{user_id}/ban"))
            .await
    }

    pub async fn unban_user(&self, user_id: Uuid) -> ApiResult<Option<String>> {
        self.ack(Method::POST, &format!("/admin/users/{user_id}/unban"))
            .await
    }

    pub async fn delete_user(&self, user_id: Uuid) -> ApiResult<Option<String>> {
        self.ack(Method::DELETE, &format!("/admin/users/{user_id}"))
            .await
    }

    pub async fn posts(&self, page: PageQuery) -> ApiResult<PageResponse<PostAdmin>> {
        self.api
            .enveloped(Method::GET, "/admin/posts", |b| page.apply(b))
            .await
    }

    pub async fn hide_post(&self, post_id: Uuid) -> ApiResult<Option<String>> {
        self.ack(Method::POST, &format!("/admin/posts/{post_id}/hide"))
            .await
    }

    pub async fn unhide_post(&self, post_id: Uuid) -> ApiResult<Option<String>> {
        self.ack(Method::POST, &format!("/admin/posts/{post_id}/unhide"))
            .await
    }

    pub async fn delete_post(&self, post_id: Uuid) -> ApiResult<Option<String>> {
        self.ack(Method::DELETE, &format!("/admin/posts/{post_id}"))
            .await
    }

    pub async fn pending_reports(&self) -> ApiResult<Vec<Report>> {
        self.api
            .enveloped(Method::GET, "/admin/reports/pending", |b| b)
            .await
    }

    pub async fn all_reports(&self) -> ApiResult<Vec<Report>> {
        self.api
            .enveloped(Method::GET, "/admin/reports", |b| b)
            .await
    }

    pub async fn resolve_report(&self, report_id: Uuid, note: &str) -> ApiResult<Option<String>> {
        self.note(&format!("/admin/reports/{report_id}/resolve"), note)
            .await
    }

    pub async fn dismiss_report(&self, report_id: Uuid, note: &str) -> ApiResult<Option<String>> {
        self.note(&format!("/admin/reports/{report_id}/dismiss"), note)
            .await
    }

    async fn ack(&self, method: Method, path: &str) -> ApiResult<Option<String>> {
        let with_body = method == Method::POST;
        self.api
            .enveloped_ack(method, path, |b| {
                if with_body {
                    b.json(&serde_json::json!({}))
                } else {
                    b
                }
            })
            .await
    }

    async fn note(&self, path: &str, note: &str) -> ApiResult<Option<String>> {
        let body = AdminNoteRequest {
            admin_note: note.to_string(),
        };
        self.api
            .enveloped_ack(Method::POST, path, |b| b.json(&body))
            .await
    }
}
