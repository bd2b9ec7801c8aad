use crate::api_client::ApiClient;
use crate::error::ApiResult;
use crate::validation::Validate;
use inkpost_common::api::CreateReportRequest;
use reqwest::Method;

#[derive(Clone)]
pub struct ReportsClient {
    api: ApiClient,
}

impl ReportsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Files a report against a user. Returns the backend's confirmation
    /// message; duplicates come back as the backend's own error message.
    pub async fn create(&self, req: &CreateReportRequest) -> ApiResult<Option<String>> {
        req.validate()?;
        self.api
            .enveloped_ack(Method::POST, "/reports", |b| b.json(req))
            .await
    }
}
