use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned employee identifier in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EmployeeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One directory search hit.
///
/// Transient: candidate sets live only as long as the workflow that
/// requested them and are never cached across searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCandidate {
    pub id: EmployeeId,
    pub handle: String,
    pub display_name: String,
}

/// Validation errors for directory search input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchValidationError {
    #[error("Search query cannot be blank")]
    BlankQuery,
}

/// Validate a directory query before a search request is issued.
///
/// A blank query is a local no-op, not "list everyone": the directory
/// exposes no browse mode here.
pub fn validate_search_query(query: &str) -> Result<(), SearchValidationError> {
    if query.trim().is_empty() {
        return Err(SearchValidationError::BlankQuery);
    }
    Ok(())
}
