//! Conversation sessions
//!
//! This module provides the `SessionStore` that manages:
//! - Multiple independent conversation threads
//! - Append-only transcripts of queries, separators and responses
//! - The single active-session pointer
//! - Confirmed deletion and self-healing selection
//! - Write-through persistence over a `KeyValueStore`

mod error;
mod model;
mod storage;
mod store;

pub use error::StoreError;
pub use model::{
    derive_title, Session, TranscriptEntry, QUERY_MARKER, SEPARATOR, TITLE_SNIPPET_CHARS,
    UNTITLED, WARNING_MARKER,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{
    PendingDeletion, SessionStore, ACTIVE_SESSION_KEY, CONFIRMATION_WORD, SESSIONS_KEY,
};
