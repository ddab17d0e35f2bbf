pub mod assert;

use anyhow::Context;
use diesel::{prelude::*, r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;

use crate::{
    error::{StorageError, StorageResult},
    models::kv_entries::KvEntry,
    storage::KeyValueStore,
};

pub type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

const CREATE_KV_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    entry_key VARCHAR(191) NOT NULL PRIMARY KEY,
    entry_value LONGTEXT NOT NULL
)";

pub fn build_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<MysqlConnection>::new(database_url);
    r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create pool")
}

pub fn get_db_conn(
    pool: &DbPool,
) -> StorageResult<PooledConnection<ConnectionManager<MysqlConnection>>> {
    pool.get().map_err(StorageError::from)
}

/// Key-value entries in a MySQL table.
pub struct DatabaseStore {
    pool: DbPool,
}

impl DatabaseStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn ensure_schema(&self) -> StorageResult<()> {
        let conn = get_db_conn(&self.pool)?;
        diesel::sql_query(CREATE_KV_ENTRIES).execute(&conn)?;
        Ok(())
    }
}

impl KeyValueStore for DatabaseStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        use crate::schema::kv_entries;

        let conn = get_db_conn(&self.pool)?;
        let value = kv_entries::table
            .find(key)
            .select(kv_entries::entry_value)
            .first::<String>(&conn)
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        use crate::schema::kv_entries;

        let conn = get_db_conn(&self.pool)?;
        let data = KvEntry {
            entry_key: key.to_string(),
            entry_value: value.to_string(),
        };
        diesel::replace_into(kv_entries::table)
            .values(data)
            .execute(&conn)?;
        Ok(())
    }
}
