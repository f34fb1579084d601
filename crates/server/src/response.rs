use serde::{Deserialize, Serialize};

/// Envelope for every JSON API response the mini-program consumes:
/// `code` 0 with `data` on success, non-zero `code` with a `message`
/// on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            code: -1,
            data: None,
            message: Some(message.to_string()),
        }
    }
}
