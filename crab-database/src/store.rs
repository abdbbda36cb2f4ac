use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// A flat `id -> record` JSON document kept fully in memory.
///
/// Every mutation rewrites the whole document. Writes are serialized behind
/// `write_lock`, and the snapshot for a write is taken while holding it, so the
/// file on disk always reflects mutations in the order they completed.
#[derive(Debug)]
pub struct JsonDocument<T> {
    path: PathBuf,
    records: RwLock<BTreeMap<String, T>>,
    write_lock: Mutex<()>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Load the document at `path`. A missing or blank file yields an empty map.
    pub async fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let records = read_records(&path).await?;
        info!(path = %path.display(), records = records.len(), "loaded document");

        Ok(Self {
            path,
            records: RwLock::new(records),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        self.records.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Clone of every record, ordered by key.
    pub async fn entries(&self) -> Vec<(String, T)> {
        self.records
            .read()
            .await
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Fetch a record, inserting and persisting `default()` when absent.
    pub async fn get_or_insert_with<F>(&self, key: &str, default: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get(key).await {
            return Ok(existing);
        }

        self.update(key, default, |record| record.clone()).await
    }

    /// Mutate one record (creating it from `default` if absent) and persist
    /// the full document.
    pub async fn update<F, D, R>(&self, key: &str, default: D, mutate: F) -> anyhow::Result<R>
    where
        D: FnOnce() -> T,
        F: FnOnce(&mut T) -> R,
    {
        let _writer = self.write_lock.lock().await;

        let (result, payload) = {
            let mut records = self.records.write().await;
            let record = records.entry(key.to_owned()).or_insert_with(default);
            let result = mutate(record);
            (result, encode(&records, &self.path)?)
        };

        write_atomically(&self.path, &payload).await?;
        Ok(result)
    }

    /// Persist the current in-memory map, overwriting the backing file.
    pub async fn save(&self) -> anyhow::Result<()> {
        let _writer = self.write_lock.lock().await;

        let payload = {
            let records = self.records.read().await;
            encode(&records, &self.path)?
        };

        write_atomically(&self.path, &payload).await
    }
}

async fn read_records<T>(path: &Path) -> anyhow::Result<BTreeMap<String, T>>
where
    T: DeserializeOwned,
{
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "document missing, starting empty");
            return Ok(BTreeMap::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read `{}`", path.display()));
        }
    };

    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&raw).with_context(|| format!("failed to parse `{}`", path.display()))
}

fn encode<T: Serialize>(records: &BTreeMap<String, T>, path: &Path) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(records)
        .with_context(|| format!("failed to serialize `{}`", path.display()))
}

async fn write_atomically(path: &Path, payload: &[u8]) -> anyhow::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, payload)
        .await
        .with_context(|| format!("failed to write `{}`", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to replace `{}`", path.display()))?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::JsonDocument;

    static NEXT_DIR: AtomicU64 = AtomicU64::new(0);

    /// Fresh, empty directory under the system temp dir.
    pub(crate) fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "crab-store-{}-{}-{}",
            label,
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn missing_document_loads_empty() {
        let dir = scratch_dir("missing");
        let doc = JsonDocument::<u32>::load(dir.join("nothing.json"))
            .await
            .unwrap();

        assert!(doc.is_empty().await);
        assert!(!doc.path().exists());
    }

    #[tokio::test]
    async fn blank_document_loads_empty() {
        let dir = scratch_dir("blank");
        let path = dir.join("blank.json");
        std::fs::write(&path, "  \n").unwrap();

        let doc = JsonDocument::<u32>::load(&path).await.unwrap();
        assert_eq!(doc.len().await, 0);
    }

    #[tokio::test]
    async fn corrupt_document_is_an_error() {
        let dir = scratch_dir("corrupt");
        let path = dir.join("corrupt.json");
        std::fs::write(&path, "{\"a\": ").unwrap();

        assert!(JsonDocument::<u32>::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn update_persists_full_snapshot() {
        let dir = scratch_dir("update");
        let path = dir.join("counts.json");
        let doc = JsonDocument::<u32>::load(&path).await.unwrap();

        doc.update("a", || 0, |n| *n += 2).await.unwrap();
        doc.update("b", || 10, |n| *n += 1).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!({ "a": 2, "b": 11 }));

        let reopened = JsonDocument::<u32>::load(&path).await.unwrap();
        assert_eq!(reopened.get("a").await, Some(2));
        assert_eq!(reopened.get("b").await, Some(11));
    }

    #[tokio::test]
    async fn get_or_insert_with_keeps_existing_record() {
        let dir = scratch_dir("insert");
        let doc = JsonDocument::<u32>::load(dir.join("values.json"))
            .await
            .unwrap();

        assert_eq!(doc.get_or_insert_with("k", || 7).await.unwrap(), 7);
        assert_eq!(doc.get_or_insert_with("k", || 99).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn concurrent_updates_are_not_lost() {
        let dir = scratch_dir("concurrent");
        let path = dir.join("counter.json");
        let doc = std::sync::Arc::new(JsonDocument::<u32>::load(&path).await.unwrap());

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let doc = doc.clone();
            tasks.push(tokio::spawn(async move {
                doc.update("hits", || 0, |n| *n += 1).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let reopened = JsonDocument::<u32>::load(&path).await.unwrap();
        assert_eq!(reopened.get("hits").await, Some(16));
    }
}
