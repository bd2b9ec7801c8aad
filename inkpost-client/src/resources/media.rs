use crate::api_client::ApiClient;
use crate::error::ApiResult;
use crate::validation::validate_media;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct MediaClient {
    api: ApiClient,
}

impl MediaClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Attaches one file to a post. The file is checked locally first and
    /// rejected files never leave the machine.
    pub async fn upload(
        &self,
        post_id: Uuid,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<()> {
        validate_media(content_type, &bytes)?;
        debug!(%post_id, file_name, size = bytes.len(), "uploading media");

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("files", part);

        self.api
            .no_content(Method::POST, &format!("/media/upload/{post_id}"), |b| {
                b.multipart(form)
            })
            .await
    }

    pub async fn delete(&self, media_id: Uuid) -> ApiResult<()> {
        self.api
            .no_content(Method::DELETE, &format!("/media/{media_id}"), |b| b)
            .await
    }
}
