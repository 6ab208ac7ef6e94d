use super::product::Product;
use super::token::{Token, TokenStatus};
use crate::error::StoreResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn upsert(&self, product: Product) -> StoreResult<()>;
    async fn get(&self, product_id: &str) -> StoreResult<Option<Product>>;
    /// All products, in no particular order.
    async fn list(&self) -> StoreResult<Vec<Product>>;
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Inserts the whole batch or nothing. Fails with `Conflict` if any id is already taken.
    async fn insert_all(&self, tokens: Vec<Token>) -> StoreResult<Vec<Token>>;
    async fn get(&self, token_id: Uuid) -> StoreResult<Option<Token>>;
    /// Tokens in `status`, most recent `created_at` first.
    async fn list_by_status(&self, status: TokenStatus) -> StoreResult<Vec<Token>>;
    /// Atomically sets the status to `new` only if it currently equals `expected`.
    ///
    /// Returns the updated token when the write was applied, `None` when no token
    /// matched (unknown id or a different current status).
    async fn update_status_if(
        &self,
        token_id: Uuid,
        expected: TokenStatus,
        new: TokenStatus,
    ) -> StoreResult<Option<Token>>;
}

pub type ProductStoreBox = Box<dyn ProductStore>;
pub type TokenStoreBox = Box<dyn TokenStore>;
