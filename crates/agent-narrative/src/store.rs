//! Cache store for normalized financial data
//!
//! The fetching tools persist their results as whole JSON documents under a
//! fixed key each; the narrative tool reads them back. The store is a trait
//! so the location is injected rather than derived from the process working
//! directory.

use crate::error::{NarrativeError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The two cache entries shared between tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEntry {
    /// Income statement records with derived margins
    Income,
    /// Enterprise value records
    EnterpriseValue,
}

impl CacheEntry {
    /// File name of the entry inside a [`FileStore`]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Income => "income_data.json",
            Self::EnterpriseValue => "ev_data.json",
        }
    }

    /// Name of the tool that populates this entry
    pub fn producer(self) -> &'static str {
        match self {
            Self::Income => crate::tools::income::TOOL_NAME,
            Self::EnterpriseValue => crate::tools::enterprise_value::TOOL_NAME,
        }
    }
}

impl fmt::Display for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Storage for serialized cache entries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Whether the entry has been written
    async fn exists(&self, entry: CacheEntry) -> Result<bool>;

    /// Read the entry's contents, `None` if it was never written
    async fn read(&self, entry: CacheEntry) -> Result<Option<String>>;

    /// Replace the entry's contents
    ///
    /// Readers observe either the previous or the new contents, never a mix.
    async fn write(&self, entry: CacheEntry, contents: &str) -> Result<()>;
}

/// File-per-entry store rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an entry's file
    pub fn path_of(&self, entry: CacheEntry) -> PathBuf {
        self.root.join(entry.file_name())
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn exists(&self, entry: CacheEntry) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.path_of(entry)).await?)
    }

    async fn read(&self, entry: CacheEntry) -> Result<Option<String>> {
        let path = self.path_of(entry);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), bytes = contents.len(), "Read cache entry");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NarrativeError::StorageError(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn write(&self, entry: CacheEntry, contents: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            NarrativeError::StorageError(format!(
                "failed to create {}: {e}",
                self.root.display()
            ))
        })?;

        let path = self.path_of(entry);
        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", entry.file_name(), uuid::Uuid::new_v4()));

        if let Err(e) = tokio::fs::write(&tmp, contents).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(NarrativeError::StorageError(format!(
                "failed to write {}: {e}",
                tmp.display()
            )));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(NarrativeError::StorageError(format!(
                "failed to replace {}: {e}",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote cache entry");
        Ok(())
    }
}

/// In-memory store, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<CacheEntry, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries written so far
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if nothing has been written
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn exists(&self, entry: CacheEntry) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(&entry))
    }

    async fn read(&self, entry: CacheEntry) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(&entry).cloned())
    }

    async fn write(&self, entry: CacheEntry, contents: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(entry, contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_entry_names() {
        assert_eq!(CacheEntry::Income.file_name(), "income_data.json");
        assert_eq!(CacheEntry::EnterpriseValue.file_name(), "ev_data.json");
        assert_eq!(CacheEntry::Income.producer(), "fetch_income_statement_fmp");
        assert_eq!(CacheEntry::EnterpriseValue.producer(), "fetch_ev_fmp");
        assert_eq!(CacheEntry::Income.to_string(), "income_data.json");
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("workspace"));
        assert_eq!(store.root(), dir.path().join("workspace").as_path());

        assert!(!store.exists(CacheEntry::Income).await.unwrap());
        assert_eq!(store.read(CacheEntry::Income).await.unwrap(), None);

        store.write(CacheEntry::Income, r#"{"a":1}"#).await.unwrap();
        assert!(store.exists(CacheEntry::Income).await.unwrap());
        assert!(!store.exists(CacheEntry::EnterpriseValue).await.unwrap());
        assert_eq!(
            store.read(CacheEntry::Income).await.unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
        assert!(store.path_of(CacheEntry::Income).ends_with("workspace/income_data.json"));
    }

    #[tokio::test]
    async fn test_file_store_overwrites_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.write(CacheEntry::EnterpriseValue, "first").await.unwrap();
        store.write(CacheEntry::EnterpriseValue, "second").await.unwrap();

        assert_eq!(
            store.read(CacheEntry::EnterpriseValue).await.unwrap().as_deref(),
            Some("second")
        );

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["ev_data.json".to_string()]);
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        let shared = store.clone();
        shared.write(CacheEntry::Income, "x").await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.exists(CacheEntry::Income).await.unwrap());
        assert_eq!(store.read(CacheEntry::Income).await.unwrap().as_deref(), Some("x"));
        assert_eq!(store.read(CacheEntry::EnterpriseValue).await.unwrap(), None);
    }
}
