use parking_lot::RwLock;

use std::collections::BTreeMap;

use crate::cache::{archive, checked_id, ItemType, ObjectCache};
use crate::error::Result;

/// Cache living only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<BTreeMap<(ItemType, u64), String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ObjectCache for MemoryCache {
    fn get(&self, item_type: ItemType, id: u64) -> Result<Option<String>> {
        Ok(self.entries.read().get(&(item_type, id)).cloned())
    }

    fn put(&self, item_type: ItemType, id: u64, json: &str) -> Result<()> {
        checked_id(item_type, id)?;
        self.entries.write().insert((item_type, id), json.to_string());
        Ok(())
    }

    fn clear(&self, item_type: ItemType) -> Result<()> {
        self.entries.write().retain(|(t, _), _| *t != item_type);
        Ok(())
    }

    fn export(&self) -> Result<Vec<u8>> {
        let records: Vec<_> = self
            .entries
            .read()
            .iter()
            .map(|((item_type, id), json)| (*item_type, *id, json.clone()))
            .collect();
        archive::archive_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::exercise_backend;

    #[test]
    fn test_memory_backend() {
        let cache = MemoryCache::new();
        exercise_backend(&cache);
        assert_eq!(cache.len(), 1);
    }
}
