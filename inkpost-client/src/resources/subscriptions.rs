use crate::api_client::{ApiClient, PageQuery};
use crate::error::ApiResult;
use inkpost_common::api::{PageResponse, Subscription, SubscriptionStatus};
use reqwest::Method;
use uuid::Uuid;

#[derive(Clone)]
pub struct SubscriptionsClient {
    api: ApiClient,
}

impl SubscriptionsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn toggle(&self, user_id: Uuid) -> ApiResult<SubscriptionStatus> {
        self.api
            .bare(Method::POST, &format!("/subscriptions/{user_id}"), |b| {
                b.json(&serde_json::json!({}))
            })
            .await
    }

    pub async fn status(&self, user_id: Uuid) -> ApiResult<SubscriptionStatus> {
        self.api
            .bare(Method::GET, &format!("/subscriptions/{user_id}/status"), |b| b)
            .await
    }

    /// Users `user_id` follows.
    pub async fn subscriptions(
        &self,
        user_id: Uuid,
        page: PageQuery,
    ) -> ApiResult<PageResponse<Subscription>> {
        self.api
            .bare(
                Method::GET,
                &format!("/subscriptions/{user_id}/subscriptions"),
                |b| page.apply(b),
            )
            .await
    }

    /// Users following `user_id`.
    pub async fn subscribers(
        &self,
        user_id: Uuid,
        page: PageQuery,
    ) -> ApiResult<PageResponse<Subscription>> {
        self.api
            .bare(
                Method::GET,
                &format!("/subscriptions/{user_id}/subscribers"),
                |b| page.apply(b),
            )
            .await
    }
}
