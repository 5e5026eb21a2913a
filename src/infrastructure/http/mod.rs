//! HTTP plumbing - bearer attachment and response classification

mod client;

pub use client::{decode, HttpResourceClient, ResourceClient};

#[cfg(test)]
pub use client::mock;
