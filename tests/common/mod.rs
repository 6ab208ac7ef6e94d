use async_trait::async_trait;
use fichas::domain::ports::TokenStore;
use fichas::domain::product::{Price, Product};
use fichas::domain::token::{Token, TokenStatus};
use fichas::error::{StoreError, StoreResult};
use fichas::infrastructure::in_memory::InMemoryTokenStore;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

pub fn pilsen() -> Product {
    Product::new(
        "1",
        "Pilsen",
        Price::new(dec!(12.00)).unwrap(),
        "https://cdn.example.com/pilsen.png",
    )
}

#[allow(dead_code)]
pub fn ipa() -> Product {
    Product::new(
        "2",
        "IPA",
        Price::new(dec!(18.50)).unwrap(),
        "https://cdn.example.com/ipa.png",
    )
}

/// Wraps an `InMemoryTokenStore` and fails writes on demand.
///
/// Reads keep working so tests can check what actually got persisted.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct FlakyTokenStore {
    inner: InMemoryTokenStore,
    fail_writes: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl FlakyTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Backend("backend unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TokenStore for FlakyTokenStore {
    async fn insert_all(&self, tokens: Vec<Token>) -> StoreResult<Vec<Token>> {
        self.check()?;
        self.inner.insert_all(tokens).await
    }

    async fn get(&self, token_id: Uuid) -> StoreResult<Option<Token>> {
        self.inner.get(token_id).await
    }

    async fn list_by_status(&self, status: TokenStatus) -> StoreResult<Vec<Token>> {
        self.inner.list_by_status(status).await
    }

    async fn update_status_if(
        &self,
        token_id: Uuid,
        expected: TokenStatus,
        new: TokenStatus,
    ) -> StoreResult<Option<Token>> {
        self.check()?;
        self.inner.update_status_if(token_id, expected, new).await
    }
}

/// A store whose conditional update never applies, as if another writer always
/// raced ahead without changing the visible status.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct StuckTokenStore {
    pub inner: InMemoryTokenStore,
}

#[async_trait]
impl TokenStore for StuckTokenStore {
    async fn insert_all(&self, tokens: Vec<Token>) -> StoreResult<Vec<Token>> {
        self.inner.insert_all(tokens).await
    }

    async fn get(&self, token_id: Uuid) -> StoreResult<Option<Token>> {
        self.inner.get(token_id).await
    }

    async fn list_by_status(&self, status: TokenStatus) -> StoreResult<Vec<Token>> {
        self.inner.list_by_status(status).await
    }

    async fn update_status_if(
        &self,
        _token_id: Uuid,
        _expected: TokenStatus,
        _new: TokenStatus,
    ) -> StoreResult<Option<Token>> {
        Ok(None)
    }
}
