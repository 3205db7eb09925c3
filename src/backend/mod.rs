pub mod client;
pub mod messages;

pub use client::{BackendError, DecisionService, HttpBackend, QUERY_PATH};
pub use messages::{Pillar, QueryRequest, QueryResponse};
