// ABOUTME: Session module — path resolution and on-disk storage of session payloads.
// ABOUTME: Re-exports the store, its settings, and its error kinds.

pub mod error;
pub mod resolve;
pub mod store;

pub use error::SessionError;
pub use resolve::{StorageMode, StorageSettings};
pub use store::{SessionEntry, SessionResult, SessionStore};
