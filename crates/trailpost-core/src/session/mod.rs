//! Session persistence contract.
//!
//! A session is the bearer token handed out at login/registration plus the
//! id of the signed-in user. Stores are passed explicitly to the API client;
//! nothing reads the session from ambient state.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Key-value persistence for the current session.
///
/// No expiry is tracked here; an invalid token surfaces as
/// [`ApiError::Unauthorized`] from the server.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> ApiResult<Option<Session>>;
    fn save_session(&self, session: &Session) -> ApiResult<()>;
    fn clear_session(&self) -> ApiResult<()>;

    fn set_session(&self, token: &str, user_id: &str) -> ApiResult<()> {
        self.save_session(&Session::new(token, user_id))
    }

    /// Stored bearer token, if any. Blank tokens count as absent.
    fn token(&self) -> ApiResult<Option<String>> {
        Ok(self
            .load_session()?
            .map(|session| session.token)
            .filter(|token| !token.trim().is_empty()))
    }

    fn user_id(&self) -> ApiResult<Option<String>> {
        Ok(self.load_session()?.map(|session| session.user_id))
    }
}

/// Process-local session store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(session))),
        }
    }
}

impl SessionPersistence for MemorySessionStore {
    fn load_session(&self) -> ApiResult<Option<Session>> {
        let guard = self
            .inner
            .lock()
            .map_err(|error| ApiError::SessionStorage(error.to_string()))?;
        Ok(guard.clone())
    }

    fn save_session(&self, session: &Session) -> ApiResult<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|error| ApiError::SessionStorage(error.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> ApiResult<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|error| ApiError::SessionStorage(error.to_string()))?;
        *guard = None;
        Ok(())
    }
}
