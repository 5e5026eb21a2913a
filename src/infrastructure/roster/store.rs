use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::{
    validate_team_name, ClientError, EmployeeId, MemberId, TeamDetail, TeamId, TeamSummary,
};
use crate::infrastructure::http::{decode, ResourceClient};

/// View state for the currently open team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterState {
    /// No team open.
    Idle,
    /// A load is in flight for the open team.
    Loading,
    /// The last successful server response for the open team, verbatim.
    Ready(TeamDetail),
    /// The session is valid but lacks rights over this team.
    Denied(String),
    /// The load failed for a non-authorization reason.
    Failed(ClientError),
}

impl RosterState {
    pub fn detail(&self) -> Option<&TeamDetail> {
        match self {
            Self::Ready(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }
}

/// Roster state and mutations for one open team at a time.
///
/// Membership writes never patch the snapshot locally: every successful
/// mutation is followed by a full refetch of the addressed team, so
/// server-side membership semantics (ordering, duplicate handling) reach
/// the view exactly as the server computed them. Responses that arrive
/// after the view moved on - a `close`, or a newer `open` - are discarded
/// unapplied.
#[derive(Debug)]
pub struct TeamRosterStore<C> {
    client: Arc<C>,
    current: RwLock<CurrentTeam>,
    epoch: AtomicU64,
}

#[derive(Debug)]
struct CurrentTeam {
    team_id: Option<TeamId>,
    state: RosterState,
}

impl<C: ResourceClient> TeamRosterStore<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            current: RwLock::new(CurrentTeam {
                team_id: None,
                state: RosterState::Idle,
            }),
            epoch: AtomicU64::new(0),
        }
    }

    /// The state the view renders from.
    pub fn state(&self) -> RosterState {
        self.current.read().unwrap().state.clone()
    }

    pub fn current_team(&self) -> Option<TeamId> {
        self.current.read().unwrap().team_id.clone()
    }

    /// List all teams visible to the session.
    ///
    /// The server's ordering is passed through untouched, duplicates
    /// included; the list is not reconciled against any local state.
    pub async fn list_teams(&self) -> Result<Vec<TeamSummary>, ClientError> {
        let payload = self.client.get("/teams").await?;
        decode(payload)
    }

    /// Fetch one team's detail without touching the open-team state.
    pub async fn load_team(&self, team_id: &TeamId) -> Result<TeamDetail, ClientError> {
        let payload = self.client.get(&format!("/teams/{}", team_id)).await?;
        decode(payload)
    }

    /// Open `team_id` as the current view and load its roster.
    ///
    /// The computed state is returned and also retained for `state()` -
    /// unless the view moved on while the load was in flight, in which case
    /// the shared state is left alone.
    pub async fn open(&self, team_id: TeamId) -> RosterState {
        let epoch = self.begin(team_id.clone());
        debug!(team = %team_id, "Loading team roster");

        let state = classify_load(self.load_team(&team_id).await);
        self.apply(epoch, &team_id, state.clone());
        state
    }

    /// Close the current team view. Any in-flight load or reload for it is
    /// stale from this point on and will not touch shared state.
    pub fn close(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let mut current = self.current.write().unwrap();
        current.team_id = None;
        current.state = RosterState::Idle;
        debug!("Team view closed");
    }

    /// Create a team named `name` and return the server-assigned id.
    ///
    /// The name is validated locally first: an obviously invalid input is
    /// not worth a round trip. On success no local record is synthesized;
    /// callers re-list so the server's representation stays canonical.
    pub async fn create_team(&self, name: &str) -> Result<TeamId, ClientError> {
        validate_team_name(name).map_err(|e| ClientError::validation(e.to_string()))?;

        info!(name = %name, "Creating team");
        let payload = self
            .client
            .post("/teams/create", json!({ "name": name }))
            .await?;
        let created: CreatedTeam = decode(payload)?;
        Ok(created.id)
    }

    /// Add the employee to the team, then refetch the roster.
    pub async fn add_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<TeamDetail, ClientError> {
        info!(team = %team_id, employee = %employee_id, "Adding member");
        let path = format!("/teams/{}/addMember", team_id);
        let body = json!({ "employeeId": employee_id });
        self.mutate_then_reload(team_id, self.client.post(&path, body))
            .await
    }

    /// Remove the member from the team, then refetch the roster.
    pub async fn remove_member(
        &self,
        team_id: &TeamId,
        member_id: &MemberId,
    ) -> Result<TeamDetail, ClientError> {
        info!(team = %team_id, member = %member_id, "Removing member");
        let path = format!("/teams/{}/remove", team_id);
        let body = json!({ "memberId": member_id });
        self.mutate_then_reload(team_id, self.client.delete_with_body(&path, body))
            .await
    }

    /// Run `mutation` and, only once it has succeeded, reload the team.
    ///
    /// Every membership write funnels through here so no call path can
    /// reorder the refetch ahead of the write, skip it, or patch the
    /// snapshot locally instead. A failed mutation reloads nothing.
    async fn mutate_then_reload<F>(
        &self,
        team_id: &TeamId,
        mutation: F,
    ) -> Result<TeamDetail, ClientError>
    where
        F: Future<Output = Result<serde_json::Value, ClientError>>,
    {
        let epoch = self.epoch.load(Ordering::SeqCst);

        // The ack body is the backend's own business; only its success
        // sequences the reload.
        mutation.await?;

        let outcome = self.load_team(team_id).await;
        self.apply(epoch, team_id, classify_load(outcome.clone()));
        outcome
    }

    fn begin(&self, team_id: TeamId) -> u64 {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let mut current = self.current.write().unwrap();
        current.team_id = Some(team_id);
        current.state = RosterState::Loading;
        epoch
    }

    /// Install `state` unless the view moved on while the response was in
    /// flight. The epoch is re-read under the lock so a concurrent `open`
    /// or `close` cannot slip between the staleness check and the write.
    fn apply(&self, epoch: u64, team_id: &TeamId, state: RosterState) {
        let mut current = self.current.write().unwrap();
        if self.epoch.load(Ordering::SeqCst) != epoch {
            debug!(team = %team_id, "Discarding stale roster response");
            return;
        }
        if current.team_id.as_ref() != Some(team_id) {
            debug!(team = %team_id, "Response is not for the open team, discarding");
            return;
        }
        current.state = state;
    }
}

fn classify_load(outcome: Result<TeamDetail, ClientError>) -> RosterState {
    match outcome {
        Ok(detail) => RosterState::Ready(detail),
        Err(ClientError::Forbidden { message }) => RosterState::Denied(message),
        Err(e) => RosterState::Failed(e),
    }
}

/// Create response; only the id matters to the client, everything else the
/// backend returns is ignored.
#[derive(Debug, Deserialize)]
struct CreatedTeam {
    id: TeamId,
}
