use async_trait::async_trait;
use models::StoredSessionRecord;
use tokio::sync::watch;

use crate::errors::StoreError;

/// Durable storage for the session record.
/// Implementations must make `write` and `clear` atomic with respect to readers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Replace every field of the stored record.
    async fn write(&self, record: &StoredSessionRecord) -> Result<(), StoreError>;
    /// Current record, if a complete one is stored.
    async fn read(&self) -> Result<Option<StoredSessionRecord>, StoreError>;
    /// Latest value now, and every later write or clear.
    fn subscribe(&self) -> watch::Receiver<Option<StoredSessionRecord>>;
    /// Remove all fields. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory store for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Keeps the flat key map in memory. `set_failing(true)` makes writes and
    /// clears return `StoreError::Io` without touching the data.
    pub struct MemoryCredentialStore {
        entries: Mutex<BTreeMap<String, String>>,
        tx: watch::Sender<Option<StoredSessionRecord>>,
        failing: AtomicBool,
    }

    impl Default for MemoryCredentialStore {
        fn default() -> Self {
            let (tx, _rx) = watch::channel(None);
            Self { entries: Mutex::new(BTreeMap::new()), tx, failing: AtomicBool::new(false) }
        }
    }

    impl MemoryCredentialStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn entries(&self) -> BTreeMap<String, String> {
            self.entries.lock().unwrap().clone()
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::io("memory", io::Error::new(io::ErrorKind::Other, "simulated failure")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CredentialStore for MemoryCredentialStore {
        async fn write(&self, record: &StoredSessionRecord) -> Result<(), StoreError> {
            self.check()?;
            let mut entries = self.entries.lock().unwrap();
            *entries = record.to_entries();
            self.tx.send_replace(StoredSessionRecord::from_entries(&entries));
            Ok(())
        }

        async fn read(&self) -> Result<Option<StoredSessionRecord>, StoreError> {
            let entries = self.entries.lock().unwrap();
            Ok(StoredSessionRecord::from_entries(&entries))
        }

        fn subscribe(&self) -> watch::Receiver<Option<StoredSessionRecord>> {
            self.tx.subscribe()
        }

        async fn clear(&self) -> Result<(), StoreError> {
            self.check()?;
            let mut entries = self.entries.lock().unwrap();
            entries.clear();
            self.tx.send_replace(None);
            Ok(())
        }
    }
}
