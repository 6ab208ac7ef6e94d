use crate::domain::ports::{ProductStore, TokenStore};
use crate::domain::product::Product;
use crate::domain::token::{Token, TokenStatus};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory catalog.
///
/// Uses `Arc<RwLock<BTreeMap<String, Product>>>` so clones share the same products
/// and listings come out in id order.
#[derive(Default, Clone)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<BTreeMap<String, Product>>>,
}

impl InMemoryProductStore {
    /// Creates a new, empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-loaded with `products`. Later duplicates of an id win.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn upsert(&self, product: Product) -> StoreResult<()> {
        let mut products = self.products.write().await;
        products.insert(product.id.clone(), product);
        Ok(())
    }

    async fn get(&self, product_id: &str) -> StoreResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(product_id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }
}

/// A thread-safe in-memory token table.
///
/// Every mutation happens under a single write lock, which makes both the batch
/// insert and the conditional status update atomic for all clones of the store.
/// Keyed by a `BTreeMap` so listings are deterministic when timestamps tie.
#[derive(Default, Clone)]
pub struct InMemoryTokenStore {
    tokens: Arc<RwLock<BTreeMap<Uuid, Token>>>,
}

impl InMemoryTokenStore {
    /// Creates a new, empty in-memory token store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn insert_all(&self, tokens: Vec<Token>) -> StoreResult<Vec<Token>> {
        let mut table = self.tokens.write().await;
        if let Some(taken) = tokens.iter().find(|t| table.contains_key(&t.id)) {
            return Err(StoreError::Conflict(format!(
                "token {} already exists",
                taken.id
            )));
        }
        for token in &tokens {
            table.insert(token.id, token.clone());
        }
        Ok(tokens)
    }

    async fn get(&self, token_id: Uuid) -> StoreResult<Option<Token>> {
        let table = self.tokens.read().await;
        Ok(table.get(&token_id).cloned())
    }

    async fn list_by_status(&self, status: TokenStatus) -> StoreResult<Vec<Token>> {
        let table = self.tokens.read().await;
        let mut tokens: Vec<Token> = table
            .values()
            .filter(|t| t.status == status)
            .cloned()
            .collect();
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tokens)
    }

    async fn update_status_if(
        &self,
        token_id: Uuid,
        expected: TokenStatus,
        new: TokenStatus,
    ) -> StoreResult<Option<Token>> {
        let mut table = self.tokens.write().await;
        match table.get_mut(&token_id) {
            Some(token) if token.status == expected => {
                token.status = new;
                Ok(Some(token.clone()))
            }
            _ => Ok(None),
        }
    }
}
