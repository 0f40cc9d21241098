//! Per-session state: one profile store, the last result of each feature,
//! and the set of actions currently running.
//!
//! Sessions live in memory only and are selected by the `x-session-id`
//! header. Nothing outlives the process. Idle sessions are swept after a
//! TTL and the registry refuses new sessions past its cap.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_TTL_SECS};
use crate::errors::AppError;
use crate::generation::Feature;
use crate::profile::completeness::CompletenessReport;
use crate::profile::model::{Profile, ProfileUpdate};
use crate::profile::store::ProfileStore;

pub const SESSION_HEADER: &str = "x-session-id";

/// Longer TTLs are clamped to ten years.
const MAX_IDLE_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown session: {0}")]
    UnknownSession(Uuid),

    #[error("{0} is already running for this session")]
    ActionInProgress(Feature),

    #[error("Session limit of {0} reached")]
    LimitReached(usize),
}

/// The last successful output of one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    pub feature: Feature,
    pub backend: &'static str,
    pub generated_at: DateTime<Utc>,
    pub result: Value,
}

#[derive(Debug)]
pub struct Session {
    pub store: ProfileStore,
    results: HashMap<Feature, StoredResult>,
    pending: HashSet<Feature>,
    last_active: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            store: ProfileStore::new(),
            results: HashMap::new(),
            pending: HashSet::new(),
            last_active: now,
        }
    }

    /// Idle past `ttl` with nothing running.
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.pending.is_empty() && now - self.last_active > ttl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub max_sessions: usize,
    pub idle_ttl: Duration,
}

impl SessionLimits {
    pub fn new(max_sessions: usize, idle_ttl_secs: u64) -> Self {
        let secs = idle_ttl_secs.min(MAX_IDLE_TTL_SECS) as i64;
        Self {
            max_sessions,
            idle_ttl: Duration::seconds(secs),
        }
    }
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_TTL_SECS)
    }
}

/// Identity of a freshly created session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    limits: SessionLimits,
}

impl SessionRegistry {
    pub fn new(limits: SessionLimits) -> Self {
        Self {
            inner: Arc::default(),
            limits,
        }
    }

    /// Registers a new empty session.
    ///
    /// Expired sessions are swept first; if the registry is still full the
    /// request is refused rather than evicting a live session.
    pub fn create(&self) -> Result<NewSession, SessionError> {
        let now = Utc::now();
        let mut sessions = self.inner.write();
        if sessions.len() >= self.limits.max_sessions {
            let ttl = self.limits.idle_ttl;
            sessions.retain(|_, session| !session.is_expired(now, ttl));
        }
        if sessions.len() >= self.limits.max_sessions {
            return Err(SessionError::LimitReached(self.limits.max_sessions));
        }

        let id = Uuid::new_v4();
        sessions.insert(id, Session::new(now));
        Ok(NewSession { id, created_at: now })
    }

    /// Drops a session with its profile and results.
    pub fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        self.inner
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionError::UnknownSession(id))
    }

    /// Removes every session idle longer than the TTL as of `now`.
    /// Returns how many were removed.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let ttl = self.limits.idle_ttl;
        let mut sessions = self.inner.write();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, ttl));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    // Every lookup counts as activity, so both helpers take the write lock.
    fn read<R>(&self, id: Uuid, f: impl FnOnce(&Session) -> R) -> Result<R, SessionError> {
        self.write(id, |session| f(session))
    }

    fn write<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> Result<R, SessionError> {
        let mut sessions = self.inner.write();
        let session = sessions
            .get_mut(&id)
            .ok_or(SessionError::UnknownSession(id))?;
        session.last_active = Utc::now();
        Ok(f(session))
    }

    /// Snapshot of the held profile. Later writes do not affect it.
    pub fn profile(&self, id: Uuid) -> Result<Option<Profile>, SessionError> {
        self.read(id, |s| s.store.profile().cloned())
    }

    pub fn completeness(&self, id: Uuid) -> Result<CompletenessReport, SessionError> {
        self.read(id, |s| s.store.completeness())
    }

    /// The completeness gate, evaluated against the profile held right now.
    pub fn is_complete(&self, id: Uuid) -> Result<bool, SessionError> {
        self.read(id, |s| s.store.is_complete())
    }

    /// When the held profile was last replaced, merged or cleared.
    pub fn profile_updated_at(&self, id: Uuid) -> Result<Option<DateTime<Utc>>, SessionError> {
        self.read(id, |s| s.store.updated_at())
    }

    pub fn replace_profile(
        &self,
        id: Uuid,
        profile: Option<Profile>,
    ) -> Result<Option<Profile>, SessionError> {
        self.write(id, |s| {
            s.store.replace(profile);
            s.store.profile().cloned()
        })
    }

    /// `Ok(None)` when the session holds no profile to merge into.
    pub fn merge_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<Profile>, SessionError> {
        self.write(id, |s| {
            if s.store.merge(update) {
                s.store.profile().cloned()
            } else {
                None
            }
        })
    }

    pub fn result(&self, id: Uuid, feature: Feature) -> Result<Option<StoredResult>, SessionError> {
        self.read(id, |s| s.results.get(&feature).cloned())
    }

    /// Marks `feature` as running and clears its previous result.
    ///
    /// Fails while another run of the same feature holds a ticket. The
    /// feature is released when the ticket drops, success or not.
    pub fn begin_action(&self, id: Uuid, feature: Feature) -> Result<ActionTicket, SessionError> {
        self.write(id, |s| {
            if !s.pending.insert(feature) {
                return Err(SessionError::ActionInProgress(feature));
            }
            s.results.remove(&feature);
            Ok(())
        })??;

        Ok(ActionTicket {
            registry: self.clone(),
            session_id: id,
            feature,
        })
    }
}

/// Proof that one action is running. Dropping it frees the feature.
pub struct ActionTicket {
    registry: SessionRegistry,
    session_id: Uuid,
    feature: Feature,
}

impl ActionTicket {
    /// Records a successful result as the feature's latest.
    pub fn complete(self, backend: &'static str, result: Value) -> StoredResult {
        let stored = StoredResult {
            feature: self.feature,
            backend,
            generated_at: Utc::now(),
            result,
        };
        if let Some(session) = self.registry.inner.write().get_mut(&self.session_id) {
            session.results.insert(self.feature, stored.clone());
        }
        stored
    }
}

impl Drop for ActionTicket {
    fn drop(&mut self) {
        if let Some(session) = self.registry.inner.write().get_mut(&self.session_id) {
            session.pending.remove(&self.feature);
        }
    }
}

/// Session selected by the `x-session-id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::BadRequest(format!("Missing {SESSION_HEADER} header")))?;

        let id = Uuid::parse_str(raw).map_err(|_| {
            AppError::BadRequest(format!("{SESSION_HEADER} header must be a UUID"))
        })?;
        Ok(SessionId(id))
    }
}
