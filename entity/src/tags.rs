use serde::{Deserialize, Serialize};

use crate::Id;

/// Longest tag name the backend accepts.
pub const MAX_NAME_LEN: usize = 50;

/// A tag owned by a premium user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(rename = "tagId")]
    pub id: Id,
    #[serde(rename = "tagName")]
    pub name: String,
}

/// Body of `POST /tags`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTag {
    #[serde(rename = "TagName")]
    pub name: String,
}

/// Body of `POST /todos/{id}/tags`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub tag_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_bodies_match_backend_casing() {
        assert_eq!(
            serde_json::to_value(NewTag {
                name: "work".to_string()
            })
            .unwrap(),
            json!({ "TagName": "work" })
        );
        assert_eq!(
            serde_json::to_value(Assignment {
                tag_id: "g-1".to_string()
            })
            .unwrap(),
            json!({ "tagId": "g-1" })
        );
    }
}
