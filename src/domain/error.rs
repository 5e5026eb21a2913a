use thiserror::Error;

/// Failure taxonomy shared by every client component.
///
/// `Forbidden` is a separate variant from `Unauthenticated`: a 403 means
/// the session itself is valid but lacks rights over the addressed resource,
/// and must never tear the session down. Only the session guard produces and
/// consumes `Unauthenticated`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Not authenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Request failed: {message}")]
    Transport { message: String },
}

impl ClientError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_error() {
        let error = ClientError::forbidden("You do not have permission to view this team.");
        assert_eq!(
            error.to_string(),
            "Permission denied: You do not have permission to view this team."
        );
        assert!(error.is_forbidden());
        assert!(!error.is_transport());
    }

    #[test]
    fn test_not_found_error() {
        let error = ClientError::not_found("Team 'missing' not found");
        assert_eq!(error.to_string(), "Not found: Team 'missing' not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_validation_error() {
        let error = ClientError::validation("Team name cannot be empty");
        assert_eq!(
            error.to_string(),
            "Validation error: Team name cannot be empty"
        );
        assert!(error.is_validation());
    }

    #[test]
    fn test_forbidden_is_distinct_from_transport() {
        let forbidden = ClientError::forbidden("denied");
        let transport = ClientError::transport("connection reset");
        assert_ne!(forbidden, transport);
        assert!(transport.is_transport());
        assert!(!transport.is_forbidden());
    }
}
