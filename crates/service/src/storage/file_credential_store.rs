use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::StoredSessionRecord;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use super::credential_store::CredentialStore;
use super::json_map_store::JsonMapStore;
use crate::errors::StoreError;

/// Credential store persisted as a flat JSON object (`auth_prefs.json`).
///
/// Writers are serialized; each one commits to disk, swaps the in-memory map
/// and notifies subscribers before the next writer runs.
pub struct FileCredentialStore {
    map: JsonMapStore<String, String>,
    writer: Mutex<()>,
    tx: watch::Sender<Option<StoredSessionRecord>>,
}

impl FileCredentialStore {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let map = JsonMapStore::open(path).await?;
        let current = StoredSessionRecord::from_entries(&map.snapshot().await);
        info!(path = %map.path().display(), has_session = current.is_some(), "credential store opened");
        let (tx, _rx) = watch::channel(current);
        Ok(Self { map, writer: Mutex::new(()), tx })
    }

    pub fn path(&self) -> &Path {
        self.map.path()
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn write(&self, record: &StoredSessionRecord) -> Result<(), StoreError> {
        let _guard = self.writer.lock().await;
        let entries = record.to_entries();
        let committed = self
            .map
            .update_map(|m| {
                *m = entries;
                Ok(())
            })
            .await?;
        // publish what a reopen would decode, not the caller's value
        self.tx.send_replace(StoredSessionRecord::from_entries(&committed));
        debug!(user_id = record.user_id, "session record written");
        Ok(())
    }

    async fn read(&self) -> Result<Option<StoredSessionRecord>, StoreError> {
        Ok(self.tx.borrow().clone())
    }

    fn subscribe(&self) -> watch::Receiver<Option<StoredSessionRecord>> {
        self.tx.subscribe()
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.writer.lock().await;
        self.map
            .update_map(|m| {
                m.clear();
                Ok(())
            })
            .await?;
        self.tx.send_replace(None);
        debug!("session record cleared");
        Ok(())
    }
}
