use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::cache::{archive, checked_id, ItemType, ObjectCache};
use crate::error::Result;

/// Cache stored as one JSON file per item: `<root>/<item type>/<id>.json`.
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir(&self, item_type: ItemType) -> PathBuf {
        self.root.join(item_type.as_str())
    }

    fn path(&self, item_type: ItemType, id: u64) -> PathBuf {
        self.dir(item_type).join(format!("{}.json", id))
    }
}

impl ObjectCache for FileCache {
    fn get(&self, item_type: ItemType, id: u64) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path(item_type, id)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, item_type: ItemType, id: u64, json: &str) -> Result<()> {
        checked_id(item_type, id)?;
        let dir = self.dir(item_type);
        std::fs::create_dir_all(&dir)?;

        // Readers never see a partially written file
        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        file.write_all(json.as_bytes())?;
        file.persist(self.path(item_type, id)).map_err(|e| e.error)?;
        tracing::debug!("Wrote {} {} to {}", item_type, id, dir.display());
        Ok(())
    }

    fn clear(&self, item_type: ItemType) -> Result<()> {
        match std::fs::remove_dir_all(self.dir(item_type)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tracing::info!("Cleared {} cache at {}", item_type, self.root.display());
        Ok(())
    }

    fn export(&self) -> Result<Vec<u8>> {
        std::fs::create_dir_all(&self.root)?;
        archive::archive_dir(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::{exercise_backend, sample_user, unpack};

    use twitter_client::User;

    #[test]
    fn test_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache"));
        exercise_backend(&cache);
    }

    #[test]
    fn test_creates_namespace_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested").join("cache"));
        assert!(!cache.root().exists());

        let cache_ref: &dyn ObjectCache = &cache;
        cache_ref.put_record(&sample_user(5, "eve")).unwrap();
        let path = cache.root().join("user").join("5.json");
        assert!(path.is_file());
        let stored: User = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(stored.screen_name, "eve");
    }

    #[test]
    fn test_export_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache"));
        let archive = cache.export().unwrap();
        assert!(unpack(&archive).is_empty());
    }

    #[test]
    fn test_export_skips_partial_writes() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache"));
        let cache_ref: &dyn ObjectCache = &cache;
        cache_ref.put_record(&sample_user(5, "eve")).unwrap();

        // Left behind by an interrupted `put`.
        let user_dir = cache.root().join("user");
        std::fs::write(user_dir.join(".tmpA1b2C3"), "{\"id\":5,").unwrap();
        std::fs::create_dir(user_dir.join("nested")).unwrap();
        std::fs::write(cache.root().join("notes.txt"), "hello").unwrap();

        let files = unpack(&cache.export().unwrap());
        let paths: Vec<&str> = files.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(paths, ["cache/user/5.json"]);
        let exported: User = serde_json::from_str(&files[0].1).unwrap();
        assert_eq!(exported.screen_name, "eve");
    }
}
