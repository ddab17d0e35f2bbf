pub mod kv_entries;
pub mod reservations;
pub mod reviews;
pub mod services;
pub mod stylists;
pub mod times;
