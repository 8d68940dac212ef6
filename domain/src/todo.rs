use crate::error::Error;
use crate::gateway::todo_api::{segment, TodoApiClient};
use crate::messages::*;
use crate::todos::{self, Changes, NewTodo};
use chrono::{DateTime, NaiveDate, Utc};
use log::*;

pub async fn find_all(api: &TodoApiClient) -> Result<Vec<todos::Model>, Error> {
    let todos: Vec<todos::Model> = api.get("/todos").await?;
    debug!("Fetched {} todos", todos.len());
    Ok(todos)
}

pub async fn find_by_id(api: &TodoApiClient, id: &str) -> Result<todos::Model, Error> {
    api.get(&format!("/todos/{}", segment(id))).await
}

/// Create a todo. Whitespace around the description is dropped and an empty
/// description is rejected without contacting the API.
pub async fn create(api: &TodoApiClient, new_todo: NewTodo) -> Result<todos::Model, Error> {
    let description = new_todo.description.trim().to_string();
    if description.is_empty() {
        return Err(Error::invalid(DESCRIPTION_REQUIRED));
    }

    let body = NewTodo {
        description,
        ..new_todo
    };
    let todo: todos::Model = api.post("/todos", &body).await?;

    info!("Created todo {}", todo.id);
    Ok(todo)
}

/// Send only the fields present in `changes`.
pub async fn update(api: &TodoApiClient, id: &str, changes: Changes) -> Result<(), Error> {
    let changes = Changes {
        description: changes.description.map(|d| d.trim().to_string()),
        ..changes
    };
    if changes.description.as_deref() == Some("") {
        return Err(Error::invalid(DESCRIPTION_REQUIRED));
    }
    if changes.is_empty() {
        return Err(Error::invalid(NOTHING_TO_UPDATE));
    }

    api.put(&format!("/todos/{}", segment(id)), &changes).await?;
    info!("Updated todo {id}");
    Ok(())
}

/// Flip the done flag of `todo` and return the new value.
pub async fn toggle_done(api: &TodoApiClient, todo: &todos::Model) -> Result<bool, Error> {
    let is_done = !todo.is_done;
    update(
        api,
        &todo.id,
        Changes {
            is_done: Some(is_done),
            ..Default::default()
        },
    )
    .await?;
    Ok(is_done)
}

pub async fn delete(api: &TodoApiClient, id: &str) -> Result<(), Error> {
    api.delete(&format!("/todos/{}", segment(id))).await?;
    info!("Deleted todo {id}");
    Ok(())
}

/// Parse a due date given either as a calendar date (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>, Error> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|err| {
            debug!("Rejecting due date {input:?}: {err}");
            Error::invalid(INVALID_DUE_DATE)
        })
}
