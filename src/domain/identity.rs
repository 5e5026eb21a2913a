use serde::{Deserialize, Serialize};

/// Identity the backend reports for a verified credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub handle: String,
    pub display_name: String,
}
