//! Team roster - open-team view state and the refetch-after-write protocol

mod store;

pub use store::{RosterState, TeamRosterStore};
