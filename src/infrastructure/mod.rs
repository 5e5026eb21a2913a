//! Infrastructure layer - HTTP plumbing, persistence, and view services

pub mod credentials;
pub mod directory;
pub mod http;
pub mod logging;
pub mod roster;
pub mod session;
pub mod workflow;
