//! Domain layer - Core types shared by every client component

pub mod credential;
pub mod employee;
pub mod error;
pub mod identity;
pub mod team;

pub use credential::{BearerToken, TokenStorage};
pub use employee::{
    validate_search_query, EmployeeCandidate, EmployeeId, SearchValidationError,
};
pub use error::ClientError;
pub use identity::Identity;
pub use team::{
    validate_team_name, Member, MemberId, TeamDetail, TeamId, TeamSummary, TeamValidationError,
};
