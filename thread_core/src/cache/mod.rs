// The object cache keeps every status and user fetched from the API.
// Fetched objects never change, so an entry, once written, is final until its item type is cleared.

mod archive;
mod database;
mod file;
mod memory;

pub use database::{ConnectionOptions, DatabaseCache};
pub use file::FileCache;
pub use memory::MemoryCache;

use serde::{de::DeserializeOwned, Serialize};

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use twitter_client::{Status, User};

use crate::error::{Error, Result};

/// The kinds of objects the cache stores. Each kind lives in its own namespace.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemType {
    Status,
    User,
}

impl ItemType {
    pub const ALL: [ItemType; 2] = [ItemType::Status, ItemType::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Status => "status",
            ItemType::User => "user",
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "status" => Ok(ItemType::Status),
            "user" => Ok(ItemType::User),
            _ => Err(Error::UnknownItemType(s.to_string())),
        }
    }
}

/// Storage of raw JSON records keyed by item type and id.
/// Implementations never touch the network.
pub trait ObjectCache: Send + Sync {
    /// The stored JSON of an item, or `None` if it was never written.
    fn get(&self, item_type: ItemType, id: u64) -> Result<Option<String>>;

    /// Store the JSON of an item, replacing any previous entry with the same id.
    fn put(&self, item_type: ItemType, id: u64, json: &str) -> Result<()>;

    /// Remove every entry of an item type.
    fn clear(&self, item_type: ItemType) -> Result<()>;

    /// A gzip-compressed tar archive of the whole cache, laid out as `cache/<item type>/<id>.json`.
    fn export(&self) -> Result<Vec<u8>>;
}

/// A record the cache knows how to key.
pub trait CacheRecord: Serialize + DeserializeOwned {
    const ITEM_TYPE: ItemType;

    fn id(&self) -> u64;
}

impl CacheRecord for Status {
    const ITEM_TYPE: ItemType = ItemType::Status;

    fn id(&self) -> u64 {
        self.id
    }
}

impl CacheRecord for User {
    const ITEM_TYPE: ItemType = ItemType::User;

    fn id(&self) -> u64 {
        self.id
    }
}

impl dyn ObjectCache + '_ {
    pub fn get_record<T: CacheRecord>(&self, id: u64) -> Result<Option<T>> {
        match self.get(T::ITEM_TYPE, id)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn put_record<T: CacheRecord>(&self, record: &T) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.put(T::ITEM_TYPE, record.id(), &json)
    }
}

/// Ids are stored as positive signed integers by every backend.
pub(crate) fn checked_id(item_type: ItemType, id: u64) -> Result<i64> {
    match i64::try_from(id) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidInput(format!("{} id {}", item_type, id))),
    }
}
