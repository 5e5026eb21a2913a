use std::sync::RwLock;

use crate::domain::{BearerToken, TokenStorage};

/// In-memory token storage.
///
/// Used in tests and by embedders that keep the credential for the process
/// lifetime only.
#[derive(Debug, Default)]
pub struct InMemoryTokenStorage {
    token: RwLock<Option<BearerToken>>,
}

impl InMemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStorage for InMemoryTokenStorage {
    fn load(&self) -> Option<BearerToken> {
        self.token.read().unwrap().clone()
    }

    fn store(&self, token: &BearerToken) {
        *self.token.write().unwrap() = Some(token.clone());
    }

    fn clear(&self) {
        *self.token.write().unwrap() = None;
    }
}
