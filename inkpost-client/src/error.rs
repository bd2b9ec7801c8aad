use reqwest::StatusCode;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Rejected locally, nothing was sent.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: StatusCode, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Service error ({status}): {message}")]
    Server { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Maps a failed response status and the backend's message onto the error taxonomy.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::Unauthorized { status, message }
            }
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::CONFLICT => ApiError::Conflict(message),
            s if s.is_server_error() => ApiError::Server { status, message },
            _ => ApiError::Rejected { status, message },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { status, .. }
            | ApiError::Rejected { status, .. }
            | ApiError::Server { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::Conflict(_) => Some(StatusCode::CONFLICT),
            ApiError::Network(e) => e.status(),
            ApiError::Validation(_) | ApiError::Decode(_) | ApiError::Storage(_) => None,
        }
    }

    /// Short text suitable for a transient notice.
    pub fn notice(&self) -> String {
        match self {
            ApiError::Validation(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::Unauthorized { message: m, .. }
            | ApiError::Rejected { message: m, .. } => m.clone(),
            ApiError::Server { .. } => "An unexpected error occurred. Please try again later".into(),
            ApiError::Network(_) => "Could not reach the server. Check your connection".into(),
            ApiError::Decode(_) | ApiError::Storage(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_taxonomy() {
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "no".into()),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "gone".into()),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT, "dup".into()),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "down".into()),
            ApiError::Server { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, "bad".into()),
            ApiError::Rejected { .. }
        ));
    }

    #[test]
    fn server_errors_hide_details_in_notice() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "stack trace".into());
        assert!(!err.notice().contains("stack trace"));
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "You already reported this user".into());
        assert_eq!(err.notice(), "You already reported this user");
    }
}
