//! Todo operations on top of the authenticated API client.
//!
//! Entity types are re-exported so consumers of the `domain` crate do not need to depend on
//! the `entity` crate directly.
pub use entity::{tags, todos, users, Id};

pub mod auth;
pub mod error;
pub mod messages;
pub mod result;
pub mod tag;
pub mod todo;
pub mod user;

pub mod gateway;

pub use gateway::todo_api::TodoApiClient;
pub use result::ApiResult;
