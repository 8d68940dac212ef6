//! User-facing messages for failed operations.
//!
//! Failure messages are used when the API does not explain the failure itself.

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const CONFIRM_FAILED: &str = "Confirmation failed";
pub const LOGOUT_FAILED: &str = "Logout failed";

pub const FETCH_TODOS_FAILED: &str = "Failed to fetch todos";
pub const FETCH_TODO_FAILED: &str = "Failed to fetch todo";
pub const CREATE_TODO_FAILED: &str = "Failed to create todo";
pub const UPDATE_TODO_FAILED: &str = "Failed to update todo";
pub const DELETE_TODO_FAILED: &str = "Failed to delete todo";

pub const FETCH_TAGS_FAILED: &str = "Failed to fetch tags";
pub const CREATE_TAG_FAILED: &str = "Failed to create tag";
pub const DELETE_TAG_FAILED: &str = "Failed to delete tag";
pub const FETCH_TODO_TAGS_FAILED: &str = "Failed to fetch todo tags";
pub const ASSIGN_TAG_FAILED: &str = "Failed to assign tag";
pub const REMOVE_TAG_FAILED: &str = "Failed to remove tag";

pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";
pub const CODE_REQUIRED: &str = "Confirmation code is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const NOTHING_TO_UPDATE: &str = "Nothing to update";
pub const TAG_NAME_REQUIRED: &str = "Tag name is required";
pub const TAG_NAME_TOO_LONG: &str = "Tag name must be at most 50 characters";
pub const INVALID_DUE_DATE: &str = "Due date must be YYYY-MM-DD or an RFC 3339 timestamp";
