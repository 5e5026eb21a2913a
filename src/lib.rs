//! Roster client
//!
//! A session-guarded client for a team and employee roster service:
//! - One bearer credential gating every request (`CredentialStore`)
//! - Classified failures: authorization denial is never a transport error
//! - Refetch-after-write roster synchronization (`TeamRosterStore`)
//! - Transient directory search with out-of-order response discard

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use infrastructure::credentials::{CredentialStore, FileTokenStorage};
use infrastructure::directory::EmployeeSearchService;
use infrastructure::http::HttpResourceClient;
use infrastructure::roster::TeamRosterStore;
use infrastructure::session::SessionGuard;

/// One client instance: the shared credential cell plus the components a
/// view layer drives. Everything hangs off the same `HttpResourceClient`,
/// so a guard-triggered credential clear is visible to every later request.
#[derive(Debug)]
pub struct ClientContext {
    pub credentials: Arc<CredentialStore>,
    pub client: Arc<HttpResourceClient>,
    pub session: SessionGuard<HttpResourceClient>,
    pub roster: Arc<TeamRosterStore<HttpResourceClient>>,
    pub search: Arc<EmployeeSearchService<HttpResourceClient>>,
}

/// Wire a client context from configuration, priming the credential cell
/// from the token file.
pub fn create_client_context(config: &AppConfig) -> ClientContext {
    let storage = FileTokenStorage::new(&config.credentials.file);
    let credentials = Arc::new(CredentialStore::new(Box::new(storage)));

    let client = Arc::new(HttpResourceClient::with_timeout(
        &config.api.base_url,
        credentials.clone(),
        Duration::from_secs(config.api.timeout_secs),
    ));

    let session = SessionGuard::new(client.clone(), credentials.clone());
    let roster = Arc::new(TeamRosterStore::new(client.clone()));
    let search = Arc::new(EmployeeSearchService::new(client.clone()));

    ClientContext {
        credentials,
        client,
        session,
        roster,
        search,
    }
}
