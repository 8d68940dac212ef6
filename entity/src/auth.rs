//! Request and response bodies of the `/auth` endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`. Tokens are only present when `success` is true.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub email: String,
    pub confirmation_code: String,
}

/// Generic acknowledgement returned by register and confirm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confirm_request_uses_camel_case() {
        let body = ConfirmRequest {
            email: "a@b.c".to_string(),
            confirmation_code: "123456".to_string(),
        };

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "email": "a@b.c", "confirmationCode": "123456" })
        );
    }

    #[test]
    fn test_failed_login_response_has_no_tokens() {
        let response: LoginResponse =
            serde_json::from_value(json!({ "success": false, "message": "Bad password" }))
                .unwrap();

        assert!(!response.success);
        assert!(response.access_token.is_none());
        assert_eq!(response.message.as_deref(), Some("Bad password"));
    }
}
