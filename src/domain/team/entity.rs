use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned team identifier.
///
/// Opaque to the client: the backend owns its format, the client only
/// routes it back into request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TeamId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned identifier of one roster membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the teams list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
    pub member_count: usize,
}

/// One member of a team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub handle: String,
    pub display_name: String,
}

/// Snapshot of one team as the server last reported it.
///
/// Always the literal response of the most recent successful fetch, never a
/// locally patched approximation: membership semantics (ordering, duplicate
/// prevention) are the server's to decide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDetail {
    pub id: TeamId,
    pub name: String,
    pub members: Vec<Member>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_summary_wire_format() {
        let summary: TeamSummary =
            serde_json::from_str(r#"{"id":"t1","name":"Platform","memberCount":4}"#).unwrap();
        assert_eq!(summary.id, TeamId::new("t1"));
        assert_eq!(summary.name, "Platform");
        assert_eq!(summary.member_count, 4);
    }

    #[test]
    fn test_team_detail_preserves_member_order() {
        let detail: TeamDetail = serde_json::from_str(
            r#"{
                "id": "t1",
                "name": "Platform",
                "members": [
                    {"id": "m2", "handle": "bob", "displayName": "Bob"},
                    {"id": "m1", "handle": "alice", "displayName": "Alice"}
                ]
            }"#,
        )
        .unwrap();
        let handles: Vec<&str> = detail.members.iter().map(|m| m.handle.as_str()).collect();
        assert_eq!(handles, vec!["bob", "alice"]);
    }

    #[test]
    fn test_team_id_display_round_trips() {
        let id = TeamId::new("team-42");
        assert_eq!(id.to_string(), "team-42");
        assert_eq!(id.as_str(), "team-42");
    }
}
