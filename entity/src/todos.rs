use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{tags, Id};

/// A todo as returned by `GET /todos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(rename = "todoId")]
    pub id: Id,
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub tags: Vec<tags::Model>,
    #[serde(rename = "createAt", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updateAt", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// True when the todo was edited after creation.
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.created_at
    }

    /// True when the todo is open and its due date lies before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_done && self.due_date.map(|due| due < now).unwrap_or(false)
    }
}

/// Body of `POST /todos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub tag_ids: Vec<Id>,
}

/// Body of `PUT /todos/{id}`. Only the fields that are set are sent.
///
/// `due_date: Some(None)` is sent as an explicit `null` and clears the due date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<Id>>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self == &Changes::default()
    }
}
