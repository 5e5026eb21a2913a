use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::domain::{
    validate_search_query, ClientError, EmployeeCandidate, EmployeeId, TeamId,
};
use crate::infrastructure::directory::EmployeeSearchService;
use crate::infrastructure::http::ResourceClient;
use crate::infrastructure::roster::TeamRosterStore;
use crate::infrastructure::workflow::{DialogPhase, MutationGate};

/// How a finished search interacted with the displayed candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchApplication {
    /// The response became the displayed candidate set.
    Applied(Vec<EmployeeCandidate>),
    /// A newer search claimed the candidate set while this one was in
    /// flight; the response was discarded.
    Superseded,
}

/// Add-member dialog coordination for one team.
///
/// Owns the transient search state - query, candidate set - and drives the
/// membership mutation through the roster store, which refetches the
/// authoritative roster on success. Searches are sequenced: only the most
/// recently issued search may touch the candidate set, so a slow earlier
/// response can never be displayed as if it answered the latest query.
#[derive(Debug)]
pub struct AddMemberDialog<C> {
    team_id: TeamId,
    store: Arc<TeamRosterStore<C>>,
    search: Arc<EmployeeSearchService<C>>,
    gate: MutationGate,
    query: RwLock<String>,
    candidates: RwLock<Vec<EmployeeCandidate>>,
    search_ticket: AtomicU64,
}

impl<C: ResourceClient> AddMemberDialog<C> {
    pub fn new(
        team_id: TeamId,
        store: Arc<TeamRosterStore<C>>,
        search: Arc<EmployeeSearchService<C>>,
    ) -> Self {
        Self {
            team_id,
            store,
            search,
            gate: MutationGate::new(),
            query: RwLock::new(String::new()),
            candidates: RwLock::new(Vec::new()),
            search_ticket: AtomicU64::new(0),
        }
    }

    pub fn query(&self) -> String {
        self.query.read().unwrap().clone()
    }

    pub fn candidates(&self) -> Vec<EmployeeCandidate> {
        self.candidates.read().unwrap().clone()
    }

    pub fn phase(&self) -> DialogPhase {
        self.gate.phase()
    }

    /// Run a directory search and, if it is still the latest one when its
    /// response arrives, install the result as the candidate set.
    ///
    /// A superseded response is discarded entirely - including its error,
    /// if it failed: surfacing anything from an abandoned search would
    /// misattribute it to the query the user currently sees.
    pub async fn run_search(&self, query: &str) -> Result<SearchApplication, ClientError> {
        // A blank query is a local no-op. No ticket is taken, so a search
        // already in flight keeps its claim on the candidate set.
        validate_search_query(query).map_err(|e| ClientError::validation(e.to_string()))?;

        *self.query.write().unwrap() = query.to_string();
        let ticket = self.search_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let outcome = self.search.search(query).await;

        if self.search_ticket.load(Ordering::SeqCst) != ticket {
            debug!(query = %query, "Discarding superseded search response");
            return Ok(SearchApplication::Superseded);
        }

        let candidates = outcome?;
        let mut current = self.candidates.write().unwrap();
        // Re-checked under the lock: a newer search may have applied
        // between the staleness check and here.
        if self.search_ticket.load(Ordering::SeqCst) != ticket {
            debug!(query = %query, "Discarding superseded search response");
            return Ok(SearchApplication::Superseded);
        }
        *current = candidates.clone();
        Ok(SearchApplication::Applied(candidates))
    }

    /// Add `employee_id` to the team. Ignored while a prior add is still in
    /// flight. On success the roster store has already refetched the
    /// authoritative roster, and the dialog's transient state resets so the
    /// parent view can dismiss it.
    pub async fn add(&self, employee_id: &EmployeeId) -> DialogPhase {
        if !self.gate.begin() {
            debug!("Add already in flight, ignoring");
            return self.phase();
        }

        match self.store.add_member(&self.team_id, employee_id).await {
            Ok(detail) => {
                info!(
                    team = %self.team_id,
                    employee = %employee_id,
                    members = detail.members.len(),
                    "Member added"
                );
                self.reset_transient();
                self.gate.complete();
            }
            Err(e) => {
                self.gate.fail(e);
            }
        }
        self.phase()
    }

    /// Dismiss the dialog. Transient state is dropped and any search still
    /// in flight is invalidated.
    pub fn close(&self) {
        self.reset_transient();
        self.gate.reset();
    }

    fn reset_transient(&self) {
        // Invalidate in-flight searches first; their responses must not
        // repopulate a dialog that has completed or closed.
        self.search_ticket.fetch_add(1, Ordering::SeqCst);
        self.query.write().unwrap().clear();
        self.candidates.write().unwrap().clear();
    }
}
