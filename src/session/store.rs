use super::error::StoreError;
use super::model::{derive_title, Session, TranscriptEntry};
use super::storage::KeyValueStore;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Storage key holding the whole session collection as a JSON object
pub const SESSIONS_KEY: &str = "faiv_sessions";

/// Storage key holding the active session id as a plain string
pub const ACTIVE_SESSION_KEY: &str = "faiv_session_id";

/// Word a user must type to confirm a deletion
pub const CONFIRMATION_WORD: &str = "delete";

/// A deletion that was requested but not yet confirmed.
///
/// Only `SessionStore::request_deletion` creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    session_id: String,
}

impl PendingDeletion {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Owns every session, the active-session pointer and their persistence.
///
/// Once loaded, the collection is never empty and the active id always
/// names an existing session. Every successful mutation is written through
/// to storage; storage failures are logged and the store keeps working in
/// memory.
pub struct SessionStore {
    storage: Box<dyn KeyValueStore>,
    sessions: BTreeMap<String, Session>,
    active_id: String,
    persistence_degraded: bool,
}

impl SessionStore {
    /// Load sessions from storage, falling back to a fresh session when the
    /// stored state is absent, corrupt, empty or unreadable
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        info!("Loading sessions from {} storage", storage.name());

        let mut persistence_degraded = false;

        let sessions = match storage.get(SESSIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<BTreeMap<String, Value>>(&raw) {
                Ok(stored) => decode_sessions(stored),
                Err(e) => {
                    warn!("Stored sessions are corrupt, starting fresh: {}", e);
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read stored sessions, starting fresh: {:#}", e);
                persistence_degraded = true;
                BTreeMap::new()
            }
        };

        let remembered = match storage.get(ACTIVE_SESSION_KEY) {
            Ok(value) => value.map(|id| id.trim().to_string()),
            Err(e) => {
                warn!("Failed to read active session id: {:#}", e);
                persistence_degraded = true;
                None
            }
        };

        let mut store = Self {
            storage,
            sessions,
            active_id: String::new(),
            persistence_degraded,
        };

        match remembered.filter(|id| store.sessions.contains_key(id)) {
            Some(id) => store.active_id = id,
            None => store.fall_back_to_any_session(),
        }

        info!(
            "Loaded {} session(s), active: {}",
            store.sessions.len(),
            store.active_id
        );

        store
    }

    /// Create an empty, untitled session and make it active
    pub fn create_session(&mut self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), Session::new());
        self.active_id = id.clone();

        info!("Created session {}", id);

        self.persist_sessions();
        self.persist_active();
        id
    }

    pub fn select_session(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.sessions.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.active_id = id.to_string();
        debug!("Selected session {}", id);
        self.persist_active();
        Ok(())
    }

    /// Append a user query, preceded by a separator when the transcript
    /// already has entries. The first query of an untitled session names it.
    pub fn append_query(&mut self, id: &str, text: &str) -> Result<(), StoreError> {
        let session = self.session_mut(id)?;

        if session.has_messages() {
            session.push(TranscriptEntry::Separator);
        }
        session.push(TranscriptEntry::Query(text.to_string()));

        if !session.is_titled() {
            let title = derive_title(text);
            info!("Session {} titled {}", id, title);
            session.set_title(title);
        }

        self.persist_sessions();
        Ok(())
    }

    /// Append a service response verbatim
    pub fn append_response(&mut self, id: &str, text: &str) -> Result<(), StoreError> {
        self.session_mut(id)?
            .push(TranscriptEntry::Response(text.to_string()));
        self.persist_sessions();
        Ok(())
    }

    /// Append a user-visible error entry
    pub fn append_error(&mut self, id: &str, message: &str) -> Result<(), StoreError> {
        self.session_mut(id)?
            .push(TranscriptEntry::Error(message.to_string()));
        self.persist_sessions();
        Ok(())
    }

    /// Give a session an explicit title. Blank titles are ignored.
    pub fn rename_session(&mut self, id: &str, title: &str) -> Result<(), StoreError> {
        let title = title.trim();
        let session = self.session_mut(id)?;
        if title.is_empty() {
            debug!("Ignoring blank title for session {}", id);
            return Ok(());
        }

        session.set_title(title.to_string());
        info!("Renamed session {} to {}", id, title);
        self.persist_sessions();
        Ok(())
    }

    /// First step of deletion: check the session exists
    pub fn request_deletion(&self, id: &str) -> Result<PendingDeletion, StoreError> {
        if !self.sessions.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(PendingDeletion {
            session_id: id.to_string(),
        })
    }

    /// Second step of deletion. Returns whether the session was deleted.
    ///
    /// Anything other than the confirmation word (trimmed, any case) leaves
    /// the store untouched.
    pub fn confirm_deletion(&mut self, pending: PendingDeletion, typed: &str) -> bool {
        if !typed.trim().eq_ignore_ascii_case(CONFIRMATION_WORD) {
            debug!("Deletion of {} not confirmed", pending.session_id);
            return false;
        }

        let id = pending.session_id;
        if self.sessions.remove(&id).is_none() {
            warn!("Session {} disappeared before deletion was confirmed", id);
            return false;
        }

        info!("Deleted session {}", id);
        self.persist_sessions();

        if self.active_id == id {
            self.fall_back_to_any_session();
        }

        true
    }

    /// Request and confirm a deletion in one call
    pub fn delete_session(&mut self, id: &str, typed: &str) -> Result<bool, StoreError> {
        let pending = self.request_deletion(id)?;
        Ok(self.confirm_deletion(pending, typed))
    }

    pub fn ensure_non_empty(&mut self) {
        if self.sessions.is_empty() {
            self.create_session();
        }
    }

    /// Sessions in display order: oldest first, ties broken by id
    pub fn sessions(&self) -> Vec<(&str, &Session)> {
        let mut sessions: Vec<(&str, &Session)> = self
            .sessions
            .iter()
            .map(|(id, session)| (id.as_str(), session))
            .collect();
        sessions.sort_by(|a, b| a.1.created_at().cmp(&b.1.created_at()).then(a.0.cmp(b.0)));
        sessions
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.sessions.get(&self.active_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Whether the most recent storage access failed
    pub fn persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    fn session_mut(&mut self, id: &str) -> Result<&mut Session, StoreError> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Point the active id at the first session in display order, or
    /// create one if there are none
    fn fall_back_to_any_session(&mut self) {
        let first = self.sessions().first().map(|(id, _)| id.to_string());
        match first {
            Some(id) => {
                debug!("Falling back to session {}", id);
                self.active_id = id;
                self.persist_active();
            }
            None => {
                self.create_session();
            }
        }
    }

    fn persist_sessions(&mut self) {
        let serialized = match serde_json::to_string(&self.sessions) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("Failed to serialize sessions: {}", e);
                self.persistence_degraded = true;
                return;
            }
        };
        self.write(SESSIONS_KEY, &serialized);
    }

    fn persist_active(&mut self) {
        let active_id = self.active_id.clone();
        self.write(ACTIVE_SESSION_KEY, &active_id);
    }

    fn write(&mut self, key: &str, value: &str) {
        match self.storage.set(key, value) {
            Ok(()) => self.persistence_degraded = false,
            Err(e) => {
                if !self.persistence_degraded {
                    warn!("Storage unavailable, continuing in memory: {:#}", e);
                }
                self.persistence_degraded = true;
            }
        }
    }
}

/// Decode stored sessions one by one, skipping any that are malformed so a
/// single bad record cannot take the rest down with it
fn decode_sessions(stored: BTreeMap<String, Value>) -> BTreeMap<String, Session> {
    stored
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<Session>(value) {
            Ok(session) => Some((id, session)),
            Err(e) => {
                warn!("Skipping malformed stored session {}: {}", id, e);
                None
            }
        })
        .collect()
}
