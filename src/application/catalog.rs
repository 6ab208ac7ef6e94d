use crate::domain::ports::ProductStoreBox;
use crate::domain::product::Product;
use crate::error::Result;
use tracing::warn;

/// Read-only view over the product catalog.
pub struct CatalogProvider {
    store: ProductStoreBox,
}

impl CatalogProvider {
    pub fn new(store: ProductStoreBox) -> Self {
        Self { store }
    }

    /// Lists every product sorted by name, ascending. Equal names are ordered by id.
    ///
    /// A store failure is reported as `TransientError`, never as an empty catalog.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let mut products = self.store.list().await.inspect_err(|e| {
            warn!(error = %e, "failed to fetch catalog");
        })?;
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }

    pub async fn find_product(&self, product_id: &str) -> Result<Option<Product>> {
        Ok(self.store.get(product_id).await?)
    }

    /// Seeds or replaces catalog entries. Not used by the ledger.
    pub async fn import(&self, products: Vec<Product>) -> Result<usize> {
        let count = products.len();
        for product in products {
            self.store.upsert(product).await?;
        }
        Ok(count)
    }
}
