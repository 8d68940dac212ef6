//! Uniform `{ success, message }` result handed to callers of domain operations.

use serde::Serialize;

use crate::error::Error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Set when the caller should send the user back to login.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub login_required: bool,
}

impl<T: Serialize> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            login_required: false,
        }
    }

    /// Failed result; `fallback` is used when the error carries no user-facing message.
    pub fn failed(err: &Error, fallback: &str) -> Self {
        Self {
            success: false,
            message: Some(err.user_message().unwrap_or_else(|| fallback.to_string())),
            data: None,
            login_required: err.requires_login(),
        }
    }

    pub fn from_result(result: Result<T, Error>, fallback: &str) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => {
                log::debug!("{fallback}: {err:?}");
                Self::failed(&err, fallback)
            }
        }
    }
}
