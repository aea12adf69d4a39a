//! File-backed store.
//!
//! Each key lives in its own file under a base directory:
//!
//! ```text
//! .gomarket/
//! ├── _GoMarketplace_products.json
//! └── ...
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;

use crate::{KvError, KvStore};

/// Key-value store persisting one JSON file per key.
///
/// Writes go to a temp file first and are then renamed over the target,
/// so readers never observe a half-written value. Every write gets its own
/// temp file, so overlapping writes to one key never share a file and the
/// last rename wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, KvError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            std::fs::create_dir_all(&base_path)
                .map_err(|e| KvError::io(base_path.display().to_string(), e))?;
        }
        Ok(Self { base_path })
    }

    /// Returns the base directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File path for a key.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", file_stem(key)))
    }

    /// A temp path no other write (in this or another process) is using.
    fn temp_path_for(&self, key: &str) -> PathBuf {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        self.base_path.join(format!(
            ".{}.{}-{}.json.tmp",
            file_stem(key),
            std::process::id(),
            seq
        ))
    }
}

/// Map a key to a filesystem-safe stem.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::io(path.display().to_string(), e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let path = self.path_for(key);
        let temp_path = self.temp_path_for(key);

        if let Err(e) = fs::write(&temp_path, value).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(KvError::io(temp_path.display().to_string(), e));
        }
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(KvError::io(path.display().to_string(), e));
        }

        tracing::trace!(key, path = %path.display(), bytes = value.len(), "wrote value");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KvError::io(path.display().to_string(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn temp_files(store: &FileStore) -> Vec<String> {
        std::fs::read_dir(store.base_path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect()
    }

    #[test]
    fn test_file_stem_sanitizes_key() {
        assert_eq!(file_stem("@GoMarketplace:products"), "_GoMarketplace_products");
        assert_eq!(file_stem("plain-key_1.v2"), "plain-key_1.v2");
        assert_eq!(file_stem("a/b\\c"), "a_b_c");
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.base_path(), nested.as_path());
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.get("@GoMarketplace:products").await.unwrap().is_none());
        store.delete("@GoMarketplace:products").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let key = "@GoMarketplace:products";

        store.set(key, "[1]").await.unwrap();
        store.set(key, "[1,2]").await.unwrap();

        assert_eq!(store.get(key).await.unwrap().as_deref(), Some("[1,2]"));
        assert!(store.path_for(key).exists());
        assert!(temp_files(&store).is_empty());
    }

    #[test]
    fn test_temp_paths_are_unique_per_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let key = "@GoMarketplace:products";

        let first = store.temp_path_for(key);
        let second = store.temp_path_for(key);
        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(dir.path()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_overlapping_writes_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::open(dir.path()).unwrap());
        let key = "@GoMarketplace:products";

        let values: Vec<String> = (0..64).map(|n| format!("[{}]", "1,".repeat(n) + "0")).collect();
        let handles: Vec<_> = values
            .iter()
            .cloned()
            .map(|value| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.set(key, &value).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // One complete value won; nothing was interleaved or left behind.
        let stored = store.get(key).await.unwrap().unwrap();
        assert!(values.contains(&stored), "unexpected content: {stored}");
        assert!(temp_files(&store).is_empty());
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let key = "@GoMarketplace:products";

        FileStore::open(dir.path()).unwrap().set(key, "saved").await.unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get(key).await.unwrap().as_deref(), Some("saved"));

        reopened.delete(key).await.unwrap();
        assert!(reopened.get(key).await.unwrap().is_none());
    }
}
