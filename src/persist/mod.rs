pub mod types;
pub use types::*;
pub mod csv_table;
pub mod partition;
pub mod memory;
pub mod local;
pub mod s3;
use async_trait::async_trait;

pub use partition::{CsvPersister, WriteKind};

/// Minimal blob-store surface: metadata lookup, read, overwrite.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// HEAD on `key`. "Not found" is `Ok(false)`; anything else that goes wrong is an error.
    async fn exists(&self, key: &str) -> PersistResult<bool>;
    async fn get(&self, key: &str) -> PersistResult<Vec<u8>>;
    async fn put(&self, key: &str, body: Vec<u8>) -> PersistResult<()>;
}
