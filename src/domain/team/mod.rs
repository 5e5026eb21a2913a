//! Team domain - entities and input validation

mod entity;
mod validation;

pub use entity::{Member, MemberId, TeamDetail, TeamId, TeamSummary};
pub use validation::{validate_team_name, TeamValidationError};
