use chrono::NaiveDate;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("At most {limit} reservations can be made per day, {date} is fully booked")]
    CapacityExceeded { date: NaiveDate, limit: usize },

    #[error("No such {kind}: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{0}")]
    Invalid(String),

    /// Stored collection could not be parsed. The raw value is left untouched.
    #[error("Stored data under `{key}` is corrupted")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode data for `{key}`")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Database error")]
    Database(#[from] diesel::result::Error),

    #[error("Database connection error")]
    Pool(#[from] r2d2::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub fn invalid<S: ToString>(msg: S) -> Self {
        StorageError::Invalid(msg.to_string())
    }

    pub fn not_found<S: ToString>(kind: &'static str, id: S) -> Self {
        StorageError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
