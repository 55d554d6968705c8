// ── Admin session gate ──
//
// A boolean "admin authenticated" flag, persisted through a `SessionStore`
// and read once when the session is restored. This gates which screens
// the client offers; it is not a security boundary. The backend enforces
// whatever it enforces independently.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::error::CoreError;

/// Password accepted by [`AdminSession::login`].
pub const ADMIN_PASSWORD: &str = "1221";

/// Persistence for the admin flag.
pub trait SessionStore: Send + Sync {
    /// Read the persisted flag. Missing or unreadable state reads as `false`.
    fn load(&self) -> bool;

    /// Persist the flag.
    fn save(&self, authenticated: bool) -> Result<(), CoreError>;
}

/// Non-persistent store, for tests and one-shot use.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    flag: AtomicBool,
}

impl MemorySessionStore {
    pub fn new(authenticated: bool) -> Self {
        Self {
            flag: AtomicBool::new(authenticated),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn save(&self, authenticated: bool) -> Result<(), CoreError> {
        self.flag.store(authenticated, Ordering::SeqCst);
        Ok(())
    }
}

/// Session context handed to protected controllers.
///
/// Cheaply cloneable; clones share the flag.
#[derive(Clone)]
pub struct AdminSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn SessionStore>,
    authenticated: AtomicBool,
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl AdminSession {
    /// Restore a session, reading the persisted flag exactly once.
    pub fn restore(store: Arc<dyn SessionStore>) -> Self {
        let authenticated = store.load();
        debug!(authenticated, "admin session restored");
        Self {
            inner: Arc::new(SessionInner {
                store,
                authenticated: AtomicBool::new(authenticated),
            }),
        }
    }

    /// A session that is never persisted.
    pub fn in_memory() -> Self {
        Self::restore(Arc::new(MemorySessionStore::default()))
    }

    /// Check the password; on success set and persist the flag.
    ///
    /// A wrong password clears the flag and fails with
    /// [`CoreError::InvalidPassword`].
    pub fn login(&self, password: &SecretString) -> Result<(), CoreError> {
        let ok = password.expose_secret() == ADMIN_PASSWORD;
        self.set(ok)?;
        if ok {
            info!("admin login accepted");
            Ok(())
        } else {
            warn!("admin login rejected");
            Err(CoreError::InvalidPassword)
        }
    }

    /// Clear and persist the flag.
    pub fn logout(&self) -> Result<(), CoreError> {
        info!("admin logout");
        self.set(false)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.authenticated.load(Ordering::SeqCst)
    }

    /// Gate for admin screens: callers redirect to login on error.
    pub fn require_admin(&self) -> Result<(), CoreError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(CoreError::AdminRequired)
        }
    }

    fn set(&self, authenticated: bool) -> Result<(), CoreError> {
        self.inner
            .authenticated
            .store(authenticated, Ordering::SeqCst);
        self.inner.store.save(authenticated)
    }
}
