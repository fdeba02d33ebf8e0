use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};

use std::time::Duration;

use crate::cache::{archive, checked_id, ItemType, ObjectCache};
use crate::error::Result;
use crate::schema::{status_data, user_data, CREATE_TABLES};

pub type DatabasePool = Pool<ConnectionManager<SqliteConnection>>;
type Connection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// https://stackoverflow.com/questions/57123453/how-to-use-diesel-with-sqlite-connections-and-avoid-database-is-locked-type-of
#[derive(Debug)]
pub struct ConnectionOptions {
    pub enable_wal: bool,
    pub busy_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            enable_wal: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl diesel::r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        (|| {
            if let Some(d) = self.busy_timeout {
                conn.batch_execute(&format!("PRAGMA busy_timeout = {};", d.as_millis()))?;
            }
            if self.enable_wal {
                conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            }
            Ok(())
        })()
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Cache stored in SQLite, one table per item type.
#[derive(Debug, Clone)]
pub struct DatabaseCache {
    pool: DatabasePool,
}

impl DatabaseCache {
    /// Open the database at `database_url` and create the tables if needed.
    pub fn open(database_url: &str, max_size: u32, options: ConnectionOptions) -> Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .connection_customizer(Box::new(options))
            .build(manager)?;
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: DatabasePool) -> Result<Self> {
        pool.get()?.batch_execute(CREATE_TABLES)?;
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<Connection> {
        Ok(self.pool.get()?)
    }
}

impl ObjectCache for DatabaseCache {
    fn get(&self, item_type: ItemType, id: u64) -> Result<Option<String>> {
        let id = checked_id(item_type, id)?;
        let conn = &mut self.conn()?;
        let json = match item_type {
            ItemType::Status => status_data::table
                .find(id)
                .select(status_data::json_data)
                .first::<String>(conn)
                .optional()?,
            ItemType::User => user_data::table
                .find(id)
                .select(user_data::json_data)
                .first::<String>(conn)
                .optional()?,
        };
        Ok(json)
    }

    fn put(&self, item_type: ItemType, id: u64, json: &str) -> Result<()> {
        let id = checked_id(item_type, id)?;
        let conn = &mut self.conn()?;
        match item_type {
            ItemType::Status => diesel::insert_into(status_data::table)
                .values((status_data::status_id.eq(id), status_data::json_data.eq(json)))
                .on_conflict(status_data::status_id)
                .do_update()
                .set(status_data::json_data.eq(json))
                .execute(conn)?,
            ItemType::User => diesel::insert_into(user_data::table)
                .values((user_data::user_id.eq(id), user_data::json_data.eq(json)))
                .on_conflict(user_data::user_id)
                .do_update()
                .set(user_data::json_data.eq(json))
                .execute(conn)?,
        };
        tracing::debug!("Stored {} {} to database", item_type, id);
        Ok(())
    }

    fn clear(&self, item_type: ItemType) -> Result<()> {
        let conn = &mut self.conn()?;
        let count = match item_type {
            ItemType::Status => diesel::delete(status_data::table).execute(conn)?,
            ItemType::User => diesel::delete(user_data::table).execute(conn)?,
        };
        tracing::info!("Cleared {} {} records from database", count, item_type);
        Ok(())
    }

    fn export(&self) -> Result<Vec<u8>> {
        let conn = &mut self.conn()?;
        let statuses = status_data::table
            .order(status_data::status_id)
            .load::<(i64, String)>(conn)?
            .into_iter()
            .map(|(id, json)| (ItemType::Status, id as u64, json));
        let users = user_data::table
            .order(user_data::user_id)
            .load::<(i64, String)>(conn)?
            .into_iter()
            .map(|(id, json)| (ItemType::User, id as u64, json));
        archive::archive_records(statuses.chain(users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::exercise_backend;

    fn open_temp() -> (tempfile::TempDir, DatabaseCache) {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("cache.sqlite");
        let cache = DatabaseCache::open(url.to_str().unwrap(), 2, ConnectionOptions::default()).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_database_backend() {
        let (_dir, cache) = open_temp();
        exercise_backend(&cache);
    }

    #[test]
    fn test_reopen_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("cache.sqlite");
        let url = url.to_str().unwrap();
        {
            let cache = DatabaseCache::open(url, 1, ConnectionOptions::default()).unwrap();
            cache.put(ItemType::Status, 9, r#"{"id":9}"#).unwrap();
        }
        let cache = DatabaseCache::open(url, 1, ConnectionOptions::default()).unwrap();
        assert_eq!(cache.get(ItemType::Status, 9).unwrap().as_deref(), Some(r#"{"id":9}"#));
    }

    #[test]
    fn test_upsert_replaces_json() {
        let (_dir, cache) = open_temp();
        cache.put(ItemType::User, 3, r#"{"id":3,"v":1}"#).unwrap();
        cache.put(ItemType::User, 3, r#"{"id":3,"v":2}"#).unwrap();
        assert_eq!(cache.get(ItemType::User, 3).unwrap().as_deref(), Some(r#"{"id":3,"v":2}"#));
    }
}
