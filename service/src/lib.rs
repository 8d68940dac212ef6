//! Ambient infrastructure shared by the todo client: configuration and logging.

pub mod config;
pub mod logging;
