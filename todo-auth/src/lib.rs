//! # todo-auth
//!
//! Everything the todo client needs to talk to an authenticated REST API:
//! - Session token store with pluggable durable storage
//! - Client-side JWT payload decoding (no signature verification)
//! - HTTP client building with bearer attachment, refresh-on-401 and retry middleware
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use todo_auth::{
//!     http::AuthenticatedClientBuilder,
//!     session::{FileStorage, TokenStore},
//! };
//!
//! let store = TokenStore::open(Arc::new(FileStorage::new("session.json"))).await?;
//! let client = AuthenticatedClientBuilder::new("https://api.example.com", store.clone()).build()?;
//! ```

pub mod error;
pub mod http;
pub mod jwt;
pub mod session;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
pub use secrecy::{ExposeSecret, SecretString};
