pub mod backend;
pub mod config;
pub mod console;
pub mod parser;
pub mod session;
pub mod text;

pub use backend::{BackendError, DecisionService, HttpBackend, Pillar, QueryRequest, QueryResponse};
pub use config::Config;
pub use console::{Console, RenderedLine, SubmitOutcome};
pub use parser::{extract_summary, parse_response, DecisionSummary, FieldRecord};
pub use session::{
    FileStore, KeyValueStore, MemoryStore, PendingDeletion, Session, SessionStore, StoreError,
    TranscriptEntry,
};
pub use text::normalize;
