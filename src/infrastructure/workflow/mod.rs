//! Dialog workflows - mutation coordination for the protected views

mod add_member;
mod create_team;
mod dialog;

pub use add_member::{AddMemberDialog, SearchApplication};
pub use create_team::CreateTeamDialog;
pub use dialog::{DialogPhase, MutationGate};
