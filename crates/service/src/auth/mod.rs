//! Session orchestration: the repository is the only writer of the credential
//! store and the single source of truth for "who is logged in".

pub mod errors;
pub mod repository;

pub use errors::SessionError;
pub use repository::SessionRepository;
