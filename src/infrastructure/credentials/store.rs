use std::fmt;
use std::sync::RwLock;

use tracing::debug;

use crate::domain::{BearerToken, TokenStorage};

/// The single live credential for this client instance.
///
/// Every component that needs the token goes through this one cell instead
/// of reaching into storage directly: the HTTP client reads it per request,
/// the session guard clears it on rejection, and the login flow installs it.
/// The cell is primed from the storage backend at construction and kept in
/// sync with it on every write.
pub struct CredentialStore {
    current: RwLock<Option<BearerToken>>,
    storage: Box<dyn TokenStorage>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("present", &self.is_present())
            .finish()
    }
}

impl CredentialStore {
    /// Create a store backed by `storage`, priming the cell from it.
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        let current = RwLock::new(storage.load());
        Self { current, storage }
    }

    /// The current token, if a session credential exists.
    pub fn token(&self) -> Option<BearerToken> {
        self.current.read().unwrap().clone()
    }

    pub fn is_present(&self) -> bool {
        self.current.read().unwrap().is_some()
    }

    /// Install a new credential.
    pub fn set(&self, token: BearerToken) {
        self.storage.store(&token);
        *self.current.write().unwrap() = Some(token);
        debug!("Credential installed");
    }

    /// Drop the credential, both live and persisted. Called on logout and
    /// whenever the session guard observes a rejection.
    pub fn clear(&self) {
        self.storage.clear();
        *self.current.write().unwrap() = None;
        debug!("Credential cleared");
    }
}
