use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::persist::types::{PersistError, PersistResult};
use crate::persist::ObjectStore;

/// In-process object store. Used by tests and as a stand-in wherever a real
/// bucket is not wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, body: impl Into<Vec<u8>>) {
        self.objects.lock().insert(key.to_string(), body.into());
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().keys().cloned().collect()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryStore {
    async fn exists(&self, key: &str) -> PersistResult<bool> {
        Ok(self.objects.lock().contains_key(key))
    }

    async fn get(&self, key: &str) -> PersistResult<Vec<u8>> {
        self.object(key).ok_or_else(|| PersistError::NotFound(key.to_string()))
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> PersistResult<()> {
        self.objects.lock().insert(key.to_string(), body);
        Ok(())
    }
}
