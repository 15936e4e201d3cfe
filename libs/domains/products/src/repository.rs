use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, SortField, SortOrder};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products. The MongoDB
/// implementation lives in [`crate::mongodb`]; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; fails with the SKU-conflict error when the
    /// store's unique index rejects the insert
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Point lookup by record id
    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Check whether a SKU is already taken
    async fn exists_by_sku(&self, sku: &str) -> ProductResult<bool>;

    /// Count records matching a filter
    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64>;

    /// Fetch one page of matching records, ordered by (sort, order)
    async fn find_page(
        &self,
        filter: &ProductFilter,
        sort: SortField,
        order: SortOrder,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>>;

    /// Persist a fully merged record over its stored version
    async fn replace(&self, product: &Product) -> ProductResult<()>;

    /// Remove a record, returning it when it existed
    async fn delete(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Fetch the full record set (statistics scan)
    async fn all(&self) -> ProductResult<Vec<Product>>;
}
