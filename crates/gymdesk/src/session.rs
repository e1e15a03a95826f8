//! Persisted session credentials and login navigation
//!
//! The bearer token lives in a small key/value store that survives
//! restarts, the way a browser's local storage does. [`Session`] is the typed
//! view over that store; the request pipeline reads the token from it on
//! every request and clears it when the server rejects the token.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use secrecy::SecretString;

use crate::error::{Error, Result};
use crate::types::{AuthResponse, User};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key of the signed-in user, as JSON.
pub const USER_KEY: &str = "user";

/// Route of the login entry point.
pub const LOGIN_ROUTE: &str = "/login";

/// Key/value storage that outlives the process.
pub trait SessionStorage: Send + Sync + Debug {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object in a file.
///
/// The file is read once on open and rewritten in full on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Open `path`, starting empty if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                Error::Session(format!("corrupt session file {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

/// Typed access to the persisted credentials.
#[derive(Debug, Clone)]
pub struct Session {
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    /// Wrap a storage backend.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// A session over fresh in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// The stored bearer token. Empty tokens count as absent.
    pub fn token(&self) -> Option<SecretString> {
        self.storage
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::new(t.into_boxed_str()))
    }

    /// Whether a token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// The stored user, if present and readable.
    pub fn user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable stored user");
                None
            }
        }
    }

    /// Store only a token.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)
    }

    /// Persist the result of a login or registration.
    pub fn store(&self, auth: &AuthResponse) -> Result<()> {
        self.storage.set(TOKEN_KEY, &auth.token)?;
        self.storage.set(USER_KEY, &serde_json::to_string(&auth.user)?)?;
        tracing::debug!(user_id = auth.user.id, "Session stored");
        Ok(())
    }

    /// Forget the token and the user.
    ///
    /// Both keys are attempted; the first failure is returned.
    pub fn clear(&self) -> Result<()> {
        let token = self.storage.remove(TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        token.and(user)
    }
}

/// Moves the application to another route.
///
/// The client calls this with [`LOGIN_ROUTE`] when the server rejects the
/// session token. Applications plug in their own router.
pub trait Navigator: Send + Sync + Debug {
    /// Go to `route`.
    fn navigate(&self, route: &str);
}

/// Navigator that only logs; the default when none is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: &str) {
        tracing::info!(route = %route, "Navigation requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use secrecy::ExposeSecret;

    fn auth_response() -> AuthResponse {
        serde_json::from_value(serde_json::json!({
            "token": "1|abcdef",
            "user": {
                "id": 7,
                "username": "alice",
                "email": "alice@example.com",
                "role": "member",
                "created_at": "2024-01-15T10:00:00.000000Z",
                "updated_at": "2024-01-15T10:00:00.000000Z"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_store_and_clear() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());

        session.store(&auth_response()).unwrap();
        assert_eq!(session.token().unwrap().expose_secret(), "1|abcdef");
        assert_eq!(session.user().unwrap().role, Role::Member);

        session.clear().unwrap();
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let session = Session::in_memory();
        session.set_token("").unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_unreadable_user_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(USER_KEY, "{not json").unwrap();
        assert!(Session::new(storage).user().is_none());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let session = Session::new(Arc::new(FileStorage::open(&path).unwrap()));
            session.store(&auth_response()).unwrap();
        }

        let reopened = Session::new(Arc::new(FileStorage::open(&path).unwrap()));
        assert_eq!(reopened.token().unwrap().expose_secret(), "1|abcdef");
        assert_eq!(reopened.user().unwrap().username, "alice");

        reopened.clear().unwrap();
        let after_clear = FileStorage::open(&path).unwrap();
        assert_eq!(after_clear.get(TOKEN_KEY), None);
    }

    /// Storage whose token removal always fails.
    #[derive(Debug, Default)]
    struct StuckToken {
        inner: MemoryStorage,
    }

    impl SessionStorage for StuckToken {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            if key == TOKEN_KEY {
                return Err(Error::Session("token is locked".into()));
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_clear_removes_user_even_if_token_removal_fails() {
        let storage = Arc::new(StuckToken::default());
        let session = Session::new(storage.clone());
        session.store(&auth_response()).unwrap();

        let err = session.clear().unwrap_err();

        assert!(matches!(err, Error::Session(ref msg) if msg == "token is locked"));
        assert!(session.user().is_none());
        assert_eq!(storage.get(USER_KEY), None);
    }

    #[test]
    fn test_file_storage_failed_write_leaves_memory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("state");
        let path = parent.join("session.json");
        let storage = FileStorage::open(&path).unwrap();
        storage.set(TOKEN_KEY, "1|kept").unwrap();

        // A plain file where the directory should be makes every write fail.
        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, "").unwrap();

        assert!(storage.set(TOKEN_KEY, "2|lost").is_err());
        assert!(storage.remove(TOKEN_KEY).is_err());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("1|kept"));
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[1, 2, 3]").unwrap();

        let err = FileStorage::open(file.path()).unwrap_err();
        assert!(matches!(err, Error::Session(_)));
    }

    #[test]
    fn test_file_storage_empty_file_starts_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let storage = FileStorage::open(file.path()).unwrap();
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.path(), file.path());
    }
}
