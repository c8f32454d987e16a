//! Path-keyed blob storage underneath every entity.

mod keyspace;

use anyhow::Result;

pub use keyspace::KeyspaceStore;

/// Storage contract the entity layer depends on.
///
/// Paths are `/` separated and relative to the store root. Directory paths end
/// with `/`. There are no directory objects: a directory exists while some blob
/// lives beneath it.
pub trait BlobStore: Send + Sync {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>>;
    fn delete(&self, path: &str) -> Result<()>;
    /// Delete every blob beneath `dir`.
    fn delete_subtree(&self, dir: &str) -> Result<()>;
    /// Move every blob beneath `from` to the same relative path beneath `to`,
    /// all at once.
    fn rename_subtree(&self, from: &str, to: &str) -> Result<()>;
    /// Sorted, de-duplicated names of the immediate children of `dir`.
    fn list_children(&self, dir: &str) -> Result<Vec<String>>;

    fn contains(&self, path: &str) -> Result<bool> {
        Ok(self.read(path)?.is_some())
    }
}
