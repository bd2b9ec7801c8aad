//! Local checks run before a request is built. A failed check never reaches
//! the network.

use crate::error::{ApiError, ApiResult};
use inkpost_common::api::{
    CommentRequest, CreateReportRequest, LoginRequest, PostRequest, RegisterRequest,
};

pub const MAX_COMMENT_LEN: usize = 500;
pub const MAX_REPORT_REASON_LEN: usize = 500;
pub const MAX_MEDIA_BYTES: usize = 10 * 1024 * 1024;

pub trait Validate {
    fn validate(&self) -> ApiResult<()>;
}

fn required(value: &str, field: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn at_most(value: &str, max: usize, field: &str) -> ApiResult<()> {
    if value.chars().count() > max {
        return Err(ApiError::Validation(format!(
            "{field} must not exceed {max} characters"
        )));
    }
    Ok(())
}

impl Validate for LoginRequest {
    fn validate(&self) -> ApiResult<()> {
        required(&self.username, "Username")?;
        required(&self.password, "Password")
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> ApiResult<()> {
        required(&self.username, "Username")?;
        required(&self.email, "Email")?;
        required(&self.password, "Password")?;
        let valid_email = self
            .email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && !domain.is_empty());
        if !valid_email {
            return Err(ApiError::Validation("Email is not valid".into()));
        }
        Ok(())
    }
}

impl Validate for PostRequest {
    fn validate(&self) -> ApiResult<()> {
        required(&self.title, "Title")?;
        required(&self.content, "Content")
    }
}

impl Validate for CommentRequest {
    fn validate(&self) -> ApiResult<()> {
        required(&self.content, "Content")?;
        at_most(&self.content, MAX_COMMENT_LEN, "Comment")
    }
}

impl Validate for CreateReportRequest {
    fn validate(&self) -> ApiResult<()> {
        required(&self.reason, "Reason")?;
        at_most(&self.reason, MAX_REPORT_REASON_LEN, "Reason")
    }
}

/// Media types the backend accepts, with the leading bytes it checks for.
const MEDIA_TYPES: &[(&str, &[u8])] = &[
    ("image/jpeg", &[0xFF, 0xD8, 0xFF]),
    ("image/jpg", &[]),
    ("image/png", &[0x89, 0x50, 0x4E, 0x47]),
    ("image/gif", &[0x47, 0x49, 0x46, 0x38]),
    ("image/webp", &[0x52, 0x49, 0x46, 0x46]),
    ("video/mp4", &[0x00, 0x00, 0x00, 0x20, 0x66, 0x74, 0x79, 0x70]),
    ("video/mpeg", &[]),
    ("video/webm", &[]),
];

pub fn validate_media(content_type: &str, bytes: &[u8]) -> ApiResult<()> {
    let Some((_, signature)) = MEDIA_TYPES.iter().find(|(t, _)| *t == content_type) else {
        return Err(ApiError::Validation(
            "File type not allowed. Only images and videos are supported.".into(),
        ));
    };

    if bytes.len() > MAX_MEDIA_BYTES {
        return Err(ApiError::Validation(
            "File size exceeds maximum limit of 10MB".into(),
        ));
    }

    if !bytes.starts_with(signature) {
        return Err(ApiError::Validation(format!(
            "File content does not match the declared type {content_type}"
        )));
    }
    Ok(())
}

/// Guesses a content type from the file extension.
pub fn content_type_for(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    let content_type = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mpeg" | "mpg" => "video/mpeg",
        "webm" => "video/webm",
        _ => return None,
    };
    Some(content_type)
}
