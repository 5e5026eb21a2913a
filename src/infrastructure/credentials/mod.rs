//! Credential persistence - the live credential cell and its storage backends

mod file;
mod memory;
mod store;

pub use file::FileTokenStorage;
pub use memory::InMemoryTokenStorage;
pub use store::CredentialStore;
