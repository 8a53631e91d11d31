use serde::{Deserialize, Serialize};

use super::{User, UserDetail};

/// Envelope returned by directory queries, shaped like a JSON API reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub success: bool,
}

pub type UserDetailResponse = ApiResponse<UserDetail>;
pub type UserListResponse = ApiResponse<Vec<User>>;

impl<T> ApiResponse<T> {
    /// A 200 response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            status: 200,
            message: "success".to_string(),
            error: None,
            success: true,
        }
    }

    /// A failed response with no data.
    pub fn error(status: u16, error: impl Into<String>) -> Self {
        Self {
            data: None,
            status,
            message: "error".to_string(),
            error: Some(error.into()),
            success: false,
        }
    }

    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            data: self.data.map(f),
            status: self.status,
            message: self.message,
            error: self.error,
            success: self.success,
        }
    }

    /// Convert into `Ok(data)` on success, `Err(error message)` otherwise.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or(self.message)),
        }
    }
}
