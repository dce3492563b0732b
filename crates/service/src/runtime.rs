//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the composition root only needs the
//! service crate to prepare storage.

use std::path::Path;

/// Ensure the credential store's directory exists.
pub async fn ensure_env(data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_dir).await
}
