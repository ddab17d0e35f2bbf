use crate::schema::kv_entries;

#[derive(Queryable, Insertable)]
#[table_name = "kv_entries"]
pub struct KvEntry {
    pub entry_key: String,
    pub entry_value: String,
}
