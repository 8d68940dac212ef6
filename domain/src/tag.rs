//! Tag management. Every operation here is reserved for premium users and fails with
//! `PremiumRequired` before any request is made otherwise.

use crate::error::Error;
use crate::gateway::todo_api::{segment, TodoApiClient};
use crate::messages::*;
use crate::tags::{self, Assignment, NewTag, MAX_NAME_LEN};
use crate::user::require_premium;
use log::*;

pub async fn find_all(api: &TodoApiClient) -> Result<Vec<tags::Model>, Error> {
    require_premium(api).await?;
    api.get("/tags").await
}

pub async fn create(api: &TodoApiClient, name: &str) -> Result<tags::Model, Error> {
    require_premium(api).await?;
    let name = validate_name(name)?;

    let tag: tags::Model = api.post("/tags", &NewTag { name }).await?;
    info!("Created tag {}", tag.id);
    Ok(tag)
}

pub async fn delete(api: &TodoApiClient, id: &str) -> Result<(), Error> {
    require_premium(api).await?;
    api.delete(&format!("/tags/{}", segment(id))).await?;
    info!("Deleted tag {id}");
    Ok(())
}

pub async fn find_by_todo(api: &TodoApiClient, todo_id: &str) -> Result<Vec<tags::Model>, Error> {
    require_premium(api).await?;
    api.get(&format!("/todos/{}/tags", segment(todo_id))).await
}

pub async fn assign_to_todo(api: &TodoApiClient, todo_id: &str, tag_id: &str) -> Result<(), Error> {
    require_premium(api).await?;
    api.post_unit(
        &format!("/todos/{}/tags", segment(todo_id)),
        &Assignment {
            tag_id: tag_id.to_string(),
        },
    )
    .await?;
    info!("Assigned tag {tag_id} to todo {todo_id}");
    Ok(())
}

pub async fn remove_from_todo(
    api: &TodoApiClient,
    todo_id: &str,
    tag_id: &str,
) -> Result<(), Error> {
    require_premium(api).await?;
    api.delete(&format!(
        "/todos/{}/tags/{}",
        segment(todo_id),
        segment(tag_id)
    ))
    .await?;
    info!("Removed tag {tag_id} from todo {todo_id}");
    Ok(())
}

/// Trimmed tag name, or an error if it is empty or longer than [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<String, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::invalid(TAG_NAME_REQUIRED));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::invalid(TAG_NAME_TOO_LONG));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthErrorKind, DomainErrorKind};
    use crate::gateway::todo_api::test_support::client_with_session;
    use crate::user::test_support::{free_token, premium_token};
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_free_user_is_rejected_without_any_request() {
        let mut server = Server::new_async().await;
        let any = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let any_post = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let any_delete = server
            .mock("DELETE", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let api = client_with_session(&server.url(), Some(&free_token())).await;
        let premium_required = DomainErrorKind::Auth(AuthErrorKind::PremiumRequired);

        assert_eq!(find_all(&api).await.unwrap_err().error_kind, premium_required);
        assert_eq!(
            create(&api, "work").await.unwrap_err().error_kind,
            premium_required
        );
        assert_eq!(
            delete(&api, "g-1").await.unwrap_err().error_kind,
            premium_required
        );
        assert_eq!(
            find_by_todo(&api, "t-1").await.unwrap_err().error_kind,
            premium_required
        );
        assert_eq!(
            assign_to_todo(&api, "t-1", "g-1")
                .await
                .unwrap_err()
                .error_kind,
            premium_required
        );
        assert_eq!(
            remove_from_todo(&api, "t-1", "g-1")
                .await
                .unwrap_err()
                .error_kind,
            premium_required
        );

        any.assert_async().await;
        any_post.assert_async().await;
        any_delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_premium_user_lists_tags() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tags")
            .with_status(200)
            .with_body(r#"[{"tagId":"g-1","tagName":"work"}]"#)
            .create_async()
            .await;

        let api = client_with_session(&server.url(), Some(&premium_token())).await;
        let tags = find_all(&api).await.unwrap();

        assert_eq!(
            tags,
            vec![tags::Model {
                id: "g-1".to_string(),
                name: "work".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_create_sends_trimmed_name() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/tags")
            .match_body(Matcher::Json(json!({ "TagName": "work" })))
            .with_status(201)
            .with_body(r#"{"tagId":"g-2","tagName":"work"}"#)
            .create_async()
            .await;

        let api = client_with_session(&server.url(), Some(&premium_token())).await;
        let tag = create(&api, "  work ").await.unwrap();

        assert_eq!(tag.id, "g-2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_assign_and_remove_use_nested_paths() {
        let mut server = Server::new_async().await;
        let assign = server
            .mock("POST", "/todos/t-1/tags")
            .match_body(Matcher::Json(json!({ "tagId": "g-1" })))
            .with_status(200)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/todos/t-1/tags")
            .with_status(200)
            .with_body(r#"[{"tagId":"g-1","tagName":"work"}]"#)
            .create_async()
            .await;
        let remove = server
            .mock("DELETE", "/todos/t-1/tags/g-1")
            .with_status(200)
            .create_async()
            .await;

        let api = client_with_session(&server.url(), Some(&premium_token())).await;
        assign_to_todo(&api, "t-1", "g-1").await.unwrap();
        assert_eq!(find_by_todo(&api, "t-1").await.unwrap().len(), 1);
        remove_from_todo(&api, "t-1", "g-1").await.unwrap();

        assign.assert_async().await;
        list.assert_async().await;
        remove.assert_async().await;
    }

    #[test]
    fn test_validate_name_bounds() {
        assert_eq!(validate_name(" home ").unwrap(), "home");
        assert_eq!(
            validate_name("   ").unwrap_err().user_message().as_deref(),
            Some(TAG_NAME_REQUIRED)
        );

        let longest = "é".repeat(MAX_NAME_LEN);
        assert_eq!(validate_name(&longest).unwrap(), longest);
        assert_eq!(
            validate_name(&"a".repeat(MAX_NAME_LEN + 1))
                .unwrap_err()
                .user_message()
                .as_deref(),
            Some(TAG_NAME_TOO_LONG)
        );
    }
}
