table! {
    kv_entries (entry_key) {
        entry_key -> Varchar,
        entry_value -> Text,
    }
}
