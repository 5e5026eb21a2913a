use std::sync::Arc;

use tracing::debug;

use crate::domain::{validate_search_query, ClientError, EmployeeCandidate};
use crate::infrastructure::http::{decode, ResourceClient};

/// Employee directory search.
///
/// Stateless: each call issues one query and returns the server's candidate
/// list in server order. Result lifetime and ordering guarantees across
/// overlapping calls belong to the invoking workflow, which knows which
/// search the user still cares about.
#[derive(Debug)]
pub struct EmployeeSearchService<C> {
    client: Arc<C>,
}

impl<C: ResourceClient> EmployeeSearchService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Search the directory for `query`.
    ///
    /// Blank queries are rejected locally without a request.
    pub async fn search(&self, query: &str) -> Result<Vec<EmployeeCandidate>, ClientError> {
        validate_search_query(query).map_err(|e| ClientError::validation(e.to_string()))?;

        debug!(query = %query, "Searching employee directory");
        let payload = self
            .client
            .get_with_query("/employees/search", &[("q", query)])
            .await?;
        decode(payload)
    }
}
