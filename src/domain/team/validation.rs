use thiserror::Error;

/// Validation errors for team input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,
}

/// Validate a team name before a create request is issued.
///
/// A whitespace-only name counts as empty; rejecting it locally saves a
/// round trip for an input the server would refuse anyway.
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }
    Ok(())
}
