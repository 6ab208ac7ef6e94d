use crate::domain::ports::{ProductStore, TokenStore};
use crate::domain::product::Product;
use crate::domain::token::{Token, TokenStatus};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, TransactionDB,
    TransactionDBOptions,
};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for the product catalog.
pub const CF_PRODUCTS: &str = "products";
/// Column Family for issued tokens.
pub const CF_TOKENS: &str = "tokens";
/// How long a transaction waits for a row lock held by another writer before
/// giving up with an error (surfaced to callers as `TransientError`).
pub const LOCK_TIMEOUT_MS: i64 = 1000;

/// A persistent store implementation using a RocksDB `TransactionDB`.
///
/// Products and tokens live in separate Column Families. Token writes go through
/// pessimistic transactions: the batch insert commits all rows at once, and the
/// conditional status update locks the row with `get_for_update` before writing,
/// so two concurrent redemptions of the same token cannot both apply.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<TransactionDB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<TransactionDB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("products" and "tokens") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_products = ColumnFamilyDescriptor::new(CF_PRODUCTS, Options::default());
        let cf_tokens = ColumnFamilyDescriptor::new(CF_TOKENS, Options::default());

        let mut txn_db_opts = TransactionDBOptions::default();
        txn_db_opts.set_txn_lock_timeout(LOCK_TIMEOUT_MS);

        let db = TransactionDB::open_cf_descriptors(
            &opts,
            &txn_db_opts,
            path,
            vec![cf_products, cf_tokens],
        )?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> StoreResult<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            StoreError::Backend(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn scan<T: DeserializeOwned>(&self, name: &str) -> StoreResult<Vec<T>> {
        let cf = self.cf(name)?;
        let mut rows = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            rows.push(serde_json::from_slice(&value)?);
        }
        Ok(rows)
    }

    fn insert_tokens(&self, tokens: &[Token]) -> StoreResult<()> {
        let cf = self.cf(CF_TOKENS)?;
        let txn = self.db.transaction();
        for token in tokens {
            let key = token.id.as_bytes();
            if txn.get_for_update_cf(cf, key, true)?.is_some() {
                // Dropping the transaction rolls back every put made so far.
                return Err(StoreError::Conflict(format!(
                    "token {} already exists",
                    token.id
                )));
            }
            txn.put_cf(cf, key, serde_json::to_vec(token)?)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn compare_and_set(
        &self,
        token_id: Uuid,
        expected: TokenStatus,
        new: TokenStatus,
    ) -> StoreResult<Option<Token>> {
        let cf = self.cf(CF_TOKENS)?;
        let key = token_id.as_bytes();
        let txn = self.db.transaction();

        let Some(bytes) = txn.get_for_update_cf(cf, key, true)? else {
            return Ok(None);
        };
        let mut token: Token = serde_json::from_slice(&bytes)?;
        if token.status != expected {
            return Ok(None);
        }

        token.status = new;
        txn.put_cf(cf, key, serde_json::to_vec(&token)?)?;
        txn.commit()?;
        Ok(Some(token))
    }
}

#[async_trait]
impl ProductStore for RocksDBStore {
    async fn upsert(&self, product: Product) -> StoreResult<()> {
        let cf = self.cf(CF_PRODUCTS)?;
        let value = serde_json::to_vec(&product)?;
        self.db.put_cf(cf, product.id.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, product_id: &str) -> StoreResult<Option<Product>> {
        let cf = self.cf(CF_PRODUCTS)?;
        match self.db.get_cf(cf, product_id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.scan(CF_PRODUCTS)
    }
}

#[async_trait]
impl TokenStore for RocksDBStore {
    async fn insert_all(&self, tokens: Vec<Token>) -> StoreResult<Vec<Token>> {
        self.insert_tokens(&tokens)?;
        Ok(tokens)
    }

    async fn get(&self, token_id: Uuid) -> StoreResult<Option<Token>> {
        let cf = self.cf(CF_TOKENS)?;
        match self.db.get_cf(cf, token_id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn list_by_status(&self, status: TokenStatus) -> StoreResult<Vec<Token>> {
        let mut tokens: Vec<Token> = self.scan(CF_TOKENS)?;
        tokens.retain(|t| t.status == status);
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tokens)
    }

    async fn update_status_if(
        &self,
        token_id: Uuid,
        expected: TokenStatus,
        new: TokenStatus,
    ) -> StoreResult<Option<Token>> {
        self.compare_and_set(token_id, expected, new)
    }
}
