//! Session guard - credential verification in front of protected views

mod guard;

pub use guard::{GuardState, SessionGuard};
