use thiserror::Error;

/// Errors raised by storage adapters.
///
/// These never leave the application layer as-is: `CatalogProvider` and
/// `TokenLedger` convert them into [`FichaError::TransientError`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Key conflict: {0}")]
    Conflict(String),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for StoreError {
    fn from(err: rocksdb::Error) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

#[derive(Error, Debug)]
pub enum FichaError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Persistence unavailable or write conflict. Safe to retry.
    #[error("Transient error: {0}")]
    TransientError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<StoreError> for FichaError {
    fn from(err: StoreError) -> Self {
        FichaError::TransientError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FichaError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_maps_to_transient() {
        let err: FichaError = StoreError::Conflict("token 42".to_string()).into();
        assert!(matches!(err, FichaError::TransientError(ref msg) if msg.contains("token 42")));
    }
}
