use crate::api_client::{ApiClient, PageQuery};
use crate::error::ApiResult;
use inkpost_common::api::{Notification, PageResponse, UnreadCount};
use reqwest::Method;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationsClient {
    api: ApiClient,
    unread: Arc<watch::Sender<u64>>,
}

impl NotificationsClient {
    pub fn new(api: ApiClient) -> Self {
        let (unread, _) = watch::channel(0);
        Self {
            api,
            unread: Arc::new(unread),
        }
    }

    pub async fn list(&self, page: PageQuery) -> ApiResult<PageResponse<Notification>> {
        self.api
            .bare(Method::GET, "/notifications", |b| page.apply(b))
            .await
    }

    /// Fetches the unread count and publishes it to badge watchers.
    pub async fn unread_count(&self) -> ApiResult<u64> {
        let res: UnreadCount = self
            .api
            .bare(Method::GET, "/notifications/unread-count", |b| b)
            .await?;
        self.unread.send_replace(res.unread_count);
        Ok(res.unread_count)
    }

    pub async fn mark_as_read(&self, id: Uuid) -> ApiResult<()> {
        self.api
            .no_content(Method::PUT, &format!("/notifications/{id}/read"), |b| {
                b.json(&serde_json::json!({}))
            })
            .await?;

        if let Err(err) = self.unread_count().await {
            warn!("failed to refresh unread count: {err}");
        }
        Ok(())
    }

    pub async fn mark_all_as_read(&self) -> ApiResult<()> {
        self.api
            .no_content(Method::PUT, "/notifications/read-all", |b| {
                b.json(&serde_json::json!({}))
            })
            .await?;
        self.unread.send_replace(0);
        Ok(())
    }

    /// Last known unread count, without a request.
    pub fn unread(&self) -> u64 {
        *self.unread.borrow()
    }

    pub fn watch_unread(&self) -> watch::Receiver<u64> {
        self.unread.subscribe()
    }
}
