//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the data directory used by the credential store exists.
pub async fn ensure_data_dir(data_dir: &Path) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_ok() {
        debug!(data_dir = %data_dir.display(), "data directory present");
        return Ok(());
    }
    warn!(data_dir = %data_dir.display(), "data directory missing; creating it");
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    Ok(())
}
