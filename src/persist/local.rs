use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::persist::types::{PersistError, PersistResult};
use crate::persist::ObjectStore;

/// Directory-rooted store using the same key layout as the bucket:
/// `{root}/{market}/{market}_{date}.csv`. Handy for dry runs.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PersistResult<PathBuf> {
        let rel = Path::new(key);
        // keys are relative, slash-separated and never climb out of the root
        if rel.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(PersistError::Store {
                key: key.to_string(),
                message: "key must be a plain relative path".into(),
            });
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait::async_trait]
impl ObjectStore for LocalStore {
    async fn exists(&self, key: &str) -> PersistResult<bool> {
        let path = self.path_for(key)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, key: &str) -> PersistResult<Vec<u8>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PersistError::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> PersistResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, body).await?;
        Ok(())
    }
}
