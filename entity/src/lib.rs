//! Data types exchanged with the todo REST API.
//!
//! None of these are persisted locally; they mirror the JSON the backend sends and expects.

pub mod auth;
pub mod tags;
pub mod todos;
pub mod users;

/// A type alias that represents any resource's id as issued by the backend.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = String;
