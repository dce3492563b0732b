//! Storage for the session record
//!
//! `JsonMapStore` is the generic file-backed map; `FileCredentialStore` layers
//! the session record layout and change notification on top of it.

pub mod credential_store;
pub mod file_credential_store;
pub mod json_map_store;

pub use credential_store::{mock, CredentialStore};
pub use file_credential_store::FileCredentialStore;
pub use json_map_store::JsonMapStore;
