use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription tier derived from the identity provider's group claim.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Free,
    Premium,
}

impl UserType {
    pub fn is_premium(&self) -> bool {
        *self == UserType::Premium
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Free => write!(fmt, "free"),
            UserType::Premium => write!(fmt, "premium"),
        }
    }
}

/// The logged-in user, decoded from the access token. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub username: Option<String>,
    pub sub: Option<String>,
    pub name: Option<String>,
    pub user_type: UserType,
}

impl Model {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserType::Premium).unwrap(),
            "\"premium\""
        );
        assert_eq!(UserType::Free.to_string(), "free");
        assert_eq!(UserType::default(), UserType::Free);
    }

    #[test]
    fn test_display_name_falls_back() {
        let mut user = Model {
            username: Some("jdoe".to_string()),
            sub: None,
            name: None,
            user_type: UserType::Free,
        };
        assert_eq!(user.display_name(), "jdoe");

        user.username = None;
        assert_eq!(user.display_name(), "User");

        user.name = Some("Jane".to_string());
        assert_eq!(user.display_name(), "Jane");
    }
}
