use std::collections::BTreeSet;

use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use tracing::debug;

use super::BlobStore;

#[derive(Clone)]
pub struct KeyspaceStore {
    keyspace: Keyspace,
    blobs: PartitionHandle,
}

impl KeyspaceStore {
    pub fn new(keyspace: Keyspace) -> Result<KeyspaceStore> {
        let blobs = keyspace.open_partition("blobs", PartitionCreateOptions::default())?;
        Ok(KeyspaceStore { keyspace, blobs })
    }
}

impl BlobStore for KeyspaceStore {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        debug!(target: "store", path, len = bytes.len(), "write");
        self.blobs
            .insert(path, bytes)
            .with_context(|| format!("failed to write {path}"))?;
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let bytes = self
            .blobs
            .get(path)
            .with_context(|| format!("failed to read {path}"))?;
        Ok(bytes.map(|b| b.to_vec()))
    }

    fn delete(&self, path: &str) -> Result<()> {
        debug!(target: "store", path, "delete");
        self.blobs
            .remove(path)
            .with_context(|| format!("failed to delete {path}"))
    }

    fn contains(&self, path: &str) -> Result<bool> {
        self.blobs
            .contains_key(path)
            .with_context(|| format!("failed to read {path}"))
    }

    fn delete_subtree(&self, dir: &str) -> Result<()> {
        let mut batch = self.keyspace.batch();
        let mut count = 0;
        for kv in self.blobs.prefix(dir) {
            let (key, _) = kv.with_context(|| format!("failed to scan {dir}"))?;
            batch.remove(&self.blobs, key);
            count += 1;
        }
        batch
            .commit()
            .with_context(|| format!("failed to delete {dir}"))?;
        debug!(target: "store", dir, count, "deleted subtree");
        Ok(())
    }

    fn rename_subtree(&self, from: &str, to: &str) -> Result<()> {
        let mut batch = self.keyspace.batch();
        let mut count = 0;
        for kv in self.blobs.prefix(from) {
            let (key, value) = kv.with_context(|| format!("failed to scan {from}"))?;
            let mut new_key = to.as_bytes().to_vec();
            new_key.extend_from_slice(&key[from.len()..]);
            batch.insert(&self.blobs, new_key, value);
            batch.remove(&self.blobs, key);
            count += 1;
        }
        batch
            .commit()
            .with_context(|| format!("failed to move {from} to {to}"))?;
        debug!(target: "store", from, to, count, "renamed subtree");
        Ok(())
    }

    fn list_children(&self, dir: &str) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();
        for kv in self.blobs.prefix(dir) {
            let (key, _) = kv.with_context(|| format!("failed to scan {dir}"))?;
            let Ok(key) = std::str::from_utf8(&key) else {
                continue;
            };
            let rest = &key[dir.len()..];
            let name = rest.split('/').next().unwrap_or_default();
            if !name.is_empty() {
                names.insert(name.to_owned());
            }
        }
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use fjall::{Config, Keyspace};
    use tempfile::tempdir;

    use super::{BlobStore, KeyspaceStore};

    #[test]
    fn write_then_read() -> Result<()> {
        let tmp_dir = tempdir()?;
        let keyspace = Keyspace::open(Config::new(tmp_dir.path()).temporary(true))?;
        let store = KeyspaceStore::new(keyspace)?;
        store.write("c/coll1/d/_type/t1/type_meta.jsonld", b"{}")?;
        assert_eq!(
            Some(b"{}".to_vec()),
            store.read("c/coll1/d/_type/t1/type_meta.jsonld")?
        );
        assert!(store.contains("c/coll1/d/_type/t1/type_meta.jsonld")?);
        assert_eq!(None, store.read("c/coll1/d/_type/t2/type_meta.jsonld")?);
        Ok(())
    }

    #[test]
    fn list_immediate_children() -> Result<()> {
        let tmp_dir = tempdir()?;
        let keyspace = Keyspace::open(Config::new(tmp_dir.path()).temporary(true))?;
        let store = KeyspaceStore::new(keyspace)?;
        store.write("c/coll1/d/_type/t2/type_meta.jsonld", b"{}")?;
        store.write("c/coll1/d/_type/t1/type_meta.jsonld", b"{}")?;
        store.write("c/coll1/d/_type/t1/extra/file.txt", b"")?;
        store.write("c/coll1/d/_view/v1/view_meta.jsonld", b"{}")?;
        assert_eq!(vec!["t1", "t2"], store.list_children("c/coll1/d/_type/")?);
        assert!(store.list_children("c/coll2/d/_type/")?.is_empty());
        Ok(())
    }

    #[test]
    fn delete_subtree_leaves_siblings() -> Result<()> {
        let tmp_dir = tempdir()?;
        let keyspace = Keyspace::open(Config::new(tmp_dir.path()).temporary(true))?;
        let store = KeyspaceStore::new(keyspace)?;
        store.write("d/_type/t1/type_meta.jsonld", b"{}")?;
        store.write("d/_type/t1/sub/blob", b"x")?;
        store.write("d/_type/t10/type_meta.jsonld", b"{}")?;
        store.delete_subtree("d/_type/t1/")?;
        assert!(!store.contains("d/_type/t1/type_meta.jsonld")?);
        assert!(!store.contains("d/_type/t1/sub/blob")?);
        assert!(store.contains("d/_type/t10/type_meta.jsonld")?);
        Ok(())
    }

    #[test]
    fn rename_subtree_moves_everything() -> Result<()> {
        let tmp_dir = tempdir()?;
        let keyspace = Keyspace::open(Config::new(tmp_dir.path()).temporary(true))?;
        let store = KeyspaceStore::new(keyspace)?;
        store.write("d/_type/t1/type_meta.jsonld", b"{}")?;
        store.write("d/_type/t1/sub/blob", b"x")?;
        store.write("d/_type/t10/type_meta.jsonld", b"{}")?;
        store.rename_subtree("d/_type/t1/", "d/_type/t2/")?;
        assert_eq!(vec!["t10", "t2"], store.list_children("d/_type/")?);
        assert_eq!(Some(b"x".to_vec()), store.read("d/_type/t2/sub/blob")?);
        store.delete("d/_type/t2/sub/blob")?;
        assert!(!store.contains("d/_type/t2/sub/blob")?);
        assert!(store.contains("d/_type/t2/type_meta.jsonld")?);
        Ok(())
    }
}
