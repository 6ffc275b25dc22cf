//! Keychain-backed session persistence.
//!
//! Each profile keeps two entries, `token` and `userId`, so a stored session
//! survives between invocations the way the browser kept it in local storage.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;
use trailpost_core::{ApiError, ApiResult, Session, SessionPersistence};

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "trailpost-cli";

const TOKEN_FIELD: &str = "token";
const USER_ID_FIELD: &str = "userId";

#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    profile: String,
}

impl KeyringSessionStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            profile: profile_name.to_string(),
        }
    }

    fn key(&self, field: &str) -> String {
        format!("{}:{field}", self.profile)
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self, field: &str) -> ApiResult<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.key(field)).map_err(storage_error)
    }

    #[cfg(not(test))]
    fn read(&self, field: &str) -> ApiResult<Option<String>> {
        match self.entry(field)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(storage_error(error)),
        }
    }

    #[cfg(not(test))]
    fn write(&self, field: &str, value: &str) -> ApiResult<()> {
        self.entry(field)?
            .set_password(value)
            .map_err(storage_error)
    }

    #[cfg(not(test))]
    fn remove(&self, field: &str) -> ApiResult<()> {
        match self.entry(field)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(storage_error(error)),
        }
    }

    #[cfg(test)]
    fn read(&self, field: &str) -> ApiResult<Option<String>> {
        let guard = Self::test_store().lock().map_err(storage_error)?;
        Ok(guard.get(&self.key(field)).cloned())
    }

    #[cfg(test)]
    fn write(&self, field: &str, value: &str) -> ApiResult<()> {
        let mut guard = Self::test_store().lock().map_err(storage_error)?;
        guard.insert(self.key(field), value.to_string());
        Ok(())
    }

    #[cfg(test)]
    fn remove(&self, field: &str) -> ApiResult<()> {
        let mut guard = Self::test_store().lock().map_err(storage_error)?;
        guard.remove(&self.key(field));
        Ok(())
    }
}

impl SessionPersistence for KeyringSessionStore {
    fn load_session(&self) -> ApiResult<Option<Session>> {
        let Some(token) = self.read(TOKEN_FIELD)? else {
            return Ok(None);
        };
        let user_id = self.read(USER_ID_FIELD)?.unwrap_or_default();
        Ok(Some(Session::new(token, user_id)))
    }

    fn save_session(&self, session: &Session) -> ApiResult<()> {
        self.write(TOKEN_FIELD, &session.token)?;
        self.write(USER_ID_FIELD, &session.user_id)
    }

    fn clear_session(&self) -> ApiResult<()> {
        self.remove(TOKEN_FIELD)?;
        self.remove(USER_ID_FIELD)
    }
}

fn storage_error(error: impl std::fmt::Display) -> ApiError {
    ApiError::SessionStorage(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_roundtrip_uses_separate_entries() {
        let store = KeyringSessionStore::new("auth-roundtrip");
        store.set_session("tok-1", "user-1").unwrap();

        assert_eq!(store.token().unwrap().as_deref(), Some("tok-1"));
        assert_eq!(store.user_id().unwrap().as_deref(), Some("user-1"));
        assert_eq!(
            store.read(USER_ID_FIELD).unwrap().as_deref(),
            Some("user-1")
        );

        store.clear_session().unwrap();
        assert_eq!(store.load_session().unwrap(), None);
        assert_eq!(store.read(USER_ID_FIELD).unwrap(), None);
    }

    #[test]
    fn profiles_do_not_share_sessions() {
        let work = KeyringSessionStore::new("auth-work");
        let home = KeyringSessionStore::new("auth-home");
        work.set_session("tok-work", "u1").unwrap();

        assert_eq!(home.token().unwrap(), None);
        work.clear_session().unwrap();
    }
}
