use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::infrastructure::http::ResourceClient;
use crate::infrastructure::roster::TeamRosterStore;
use crate::infrastructure::workflow::{DialogPhase, MutationGate};

/// Create-team dialog coordination.
///
/// Holds the draft name and drives the create mutation exactly once at a
/// time. On confirmed success the draft resets and the phase becomes
/// `Completed`; the parent view then re-lists so the new team appears as
/// the server recorded it, not as a locally synthesized row. On failure the
/// dialog stays open with the failure in `Failed`.
#[derive(Debug)]
pub struct CreateTeamDialog<C> {
    store: Arc<TeamRosterStore<C>>,
    gate: MutationGate,
    name: RwLock<String>,
}

impl<C: ResourceClient> CreateTeamDialog<C> {
    pub fn new(store: Arc<TeamRosterStore<C>>) -> Self {
        Self {
            store,
            gate: MutationGate::new(),
            name: RwLock::new(String::new()),
        }
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.write().unwrap() = name.into();
    }

    pub fn name(&self) -> String {
        self.name.read().unwrap().clone()
    }

    pub fn phase(&self) -> DialogPhase {
        self.gate.phase()
    }

    /// Submit the draft. Ignored while a prior submission is in flight.
    pub async fn submit(&self) -> DialogPhase {
        if !self.gate.begin() {
            debug!("Create already in flight, ignoring submission");
            return self.phase();
        }

        let name = self.name();
        match self.store.create_team(&name).await {
            Ok(team_id) => {
                info!(team = %team_id, "Team created");
                self.name.write().unwrap().clear();
                self.gate.complete();
            }
            Err(e) => {
                self.gate.fail(e);
            }
        }
        self.phase()
    }

    /// Dismiss the dialog, discarding the draft regardless of phase.
    pub fn close(&self) {
        self.name.write().unwrap().clear();
        self.gate.reset();
    }
}
