use serde::{Deserialize, Serialize};

/// The `{success, data?, error?, message?}` wrapper every backend call returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Successful and carrying a payload.
    pub fn is_ok(&self) -> bool {
        self.success && self.data.is_some()
    }

    /// The backend's error text, falling back to its message.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }

    /// Splits into the payload or the text to show in an error banner.
    pub fn into_result(self, default_error: &str) -> Result<T, String> {
        match self {
            ApiResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            other => Err(other
                .error_message()
                .unwrap_or(default_error)
                .to_string()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            message: self.message,
        }
    }
}
