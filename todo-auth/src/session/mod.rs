//! Session token management with durable storage.

mod storage;
mod store;
mod tokens;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::TokenStore;
pub use tokens::{Session, StoredSession};
