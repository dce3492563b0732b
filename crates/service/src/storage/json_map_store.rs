use std::{collections::BTreeMap, path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::StoreError;

/// Generic JSON file-backed key-value map store.
///
/// Persists a `BTreeMap<K, V>` to a JSON file. Every mutation is computed on a
/// copy, written to a sibling temp file and renamed over the target before the
/// in-memory map is swapped, so a failed write changes nothing and readers
/// only ever see whole maps.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<BTreeMap<K, V>>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Ord + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`. A missing file is an empty map; an unreadable
    /// or unparsable one is an error.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| StoreError::io(parent, e))?;
        }

        let map: BTreeMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
                path: file_path.clone(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::io(&file_path, e)),
        };

        Ok(Self { inner: Arc::new(RwLock::new(map)), file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn save(&self, map: &BTreeMap<K, V>) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(map).map_err(|e| StoreError::Encode(e.to_string()))?;
        let tmp = self.temp_path();
        fs::write(&tmp, data).await.map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::io(&self.file_path, e));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }

    /// Copy of the whole map.
    pub async fn snapshot(&self) -> BTreeMap<K, V> {
        self.inner.read().await.clone()
    }

    /// Apply a mutation, persist it, then publish it. Returns the committed map.
    pub async fn update_map<F>(&self, f: F) -> Result<BTreeMap<K, V>, StoreError>
    where
        F: FnOnce(&mut BTreeMap<K, V>) -> Result<(), StoreError>,
    {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        f(&mut next)?;
        self.save(&next).await?;
        *map = next.clone();
        Ok(next)
    }
}
