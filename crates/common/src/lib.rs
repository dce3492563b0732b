//! Ambient helpers shared by every crate in the workspace: logging setup and
//! startup environment checks.

pub mod env;
pub mod utils;
