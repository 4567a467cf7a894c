use std::collections::HashMap;
use std::future::{ready, Ready};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use actix_session::storage::{LoadError, SaveError, SessionKey, SessionStore, UpdateError};
use actix_session::{Session, SessionExt, SessionGetError, SessionInsertError};
use actix_web::cookie::time::Duration;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

pub const SESSION_COOKIE: &str = "session_id";

type SessionState = HashMap<String, String>;

pub struct TypedSession(Session);

impl TypedSession {
    const DISPLAY_NAME_KEY: &'static str = "display_name";

    pub fn renew(&self) {
        self.0.renew();
    }

    pub fn insert_display_name(&self, display_name: &str) -> Result<(), SessionInsertError> {
        self.0.insert(Self::DISPLAY_NAME_KEY, display_name)
    }

    pub fn get_display_name(&self) -> Result<Option<String>, SessionGetError> {
        self.0.get(Self::DISPLAY_NAME_KEY)
    }
}

impl FromRequest for TypedSession {
    // This is a complicated way of saying
    // "We return the same error returned by the
    // implementation of `FromRequest` for `Session`".
    type Error = <Session as FromRequest>::Error;
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}

struct Entry {
    state: SessionState,
    // `None` when the ttl does not fit in an `Instant`
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(state: SessionState, ttl: &Duration) -> Self {
        Self {
            state,
            expires_at: expiry(ttl),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| expires_at > now)
    }
}

fn expiry(ttl: &Duration) -> Option<Instant> {
    // Negative ttls expire immediately
    let ttl = std::time::Duration::try_from(*ttl).unwrap_or_default();
    Instant::now().checked_add(ttl)
}

fn generate_session_key() -> Result<SessionKey, anyhow::Error> {
    let value: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .map(char::from)
        .take(64)
        .collect();
    SessionKey::try_from(value).map_err(anyhow::Error::from)
}

/// Session backend kept in process memory. Clones share the same sessions,
/// so one instance can be handed to every worker.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, Entry>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait(?Send)]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_key: &SessionKey) -> Result<Option<SessionState>, LoadError> {
        let mut sessions = self.sessions();
        let key = session_key.as_ref();
        match sessions.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => Ok(Some(entry.state.clone())),
            Some(_) => {
                sessions.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, SaveError> {
        let session_key = generate_session_key().map_err(SaveError::Other)?;
        let now = Instant::now();
        let mut sessions = self.sessions();
        sessions.retain(|_, entry| entry.is_live(now));
        sessions.insert(
            session_key.as_ref().to_owned(),
            Entry::new(session_state, ttl),
        );
        Ok(session_key)
    }

    async fn update(
        &self,
        session_key: SessionKey,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, UpdateError> {
        {
            let mut sessions = self.sessions();
            let key = session_key.as_ref();
            if sessions.get(key).map_or(false, |e| e.is_live(Instant::now())) {
                sessions.insert(key.to_owned(), Entry::new(session_state, ttl));
                return Ok(session_key);
            }
        }
        // The session expired in the meantime: start a new one
        self.save(session_state, ttl).await.map_err(|e| match e {
            SaveError::Serialization(e) => UpdateError::Serialization(e),
            SaveError::Other(e) => UpdateError::Other(e),
        })
    }

    async fn update_ttl(
        &self,
        session_key: &SessionKey,
        ttl: &Duration,
    ) -> Result<(), anyhow::Error> {
        if let Some(entry) = self.sessions().get_mut(session_key.as_ref()) {
            entry.expires_at = expiry(ttl);
        }
        Ok(())
    }

    async fn delete(&self, session_key: &SessionKey) -> Result<(), anyhow::Error> {
        self.sessions().remove(session_key.as_ref());
        Ok(())
    }
}
