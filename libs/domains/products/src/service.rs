//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use axum_helpers::auth::Role;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, DeletedProduct, Pagination, Product, ProductFilter, ProductPage, ProductQuery,
    ProductType, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::stats::{self, ProductStats};

/// Product service providing business logic operations
///
/// The service layer enforces the catalog invariants (SKU uniqueness and
/// immutability, pricing consistency), applies the role-based visibility
/// rules, and orchestrates repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    ///
    /// Rejects duplicate SKUs; the store's unique index backs this check up
    /// under concurrent creates.
    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if self.repository.exists_by_sku(&input.sku).await? {
            return Err(ProductError::DuplicateSku(input.sku.clone()));
        }

        self.repository.create(input).await
    }

    /// List products with filtering, sorting and pagination
    ///
    /// Non-admin callers only ever see public products, regardless of the
    /// requested `type` filter. The total count and the fetched page may
    /// observe different snapshots under concurrent writes; that race is
    /// accepted.
    #[instrument(skip(self, query), fields(page = query.page, limit = query.limit))]
    pub async fn list_products(
        &self,
        query: ProductQuery,
        role: Role,
    ) -> ProductResult<ProductPage> {
        let filter = ProductFilter::for_role(&query, role);

        let total_items = self.repository.count(&filter).await?;

        let skip = query.page.saturating_sub(1) * query.limit as u64;
        let products = self
            .repository
            .find_page(&filter, query.sort, query.order, skip, query.limit)
            .await?;

        let pagination = Pagination::new(query.page, query.limit as u64, total_items);

        Ok(ProductPage {
            products,
            pagination,
        })
    }

    /// Get a product by id
    ///
    /// Private products are reported as absent to non-admin callers, so
    /// visibility denial never leaks record existence.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str, role: Role) -> ProductResult<Product> {
        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        if !role.is_admin() && product.product_type == ProductType::Private {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(product)
    }

    /// Update an existing product
    ///
    /// Applies only the whitelisted fields present in the payload, then
    /// re-validates the merged record before persisting it.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        if input.sku.is_some() {
            return Err(ProductError::SkuImmutable);
        }

        if input.is_empty() {
            return Err(ProductError::Validation(
                "At least one field must be provided for update".to_string(),
            ));
        }

        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let mut product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        product.apply_update(input);

        if !product.discount_is_valid() {
            return Err(ProductError::Validation(
                "Discount price must be less than original price".to_string(),
            ));
        }

        self.repository.replace(&product).await?;

        Ok(product)
    }

    /// Delete a product, returning a minimal receipt of what was removed
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<DeletedProduct> {
        let product = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        Ok(DeletedProduct {
            id: product.id,
            sku: product.sku,
        })
    }

    /// Compute aggregate statistics over the full catalog
    ///
    /// Role gating for this operation is handled at the HTTP boundary.
    #[instrument(skip(self))]
    pub async fn product_stats(&self) -> ProductResult<ProductStats> {
        let products = self.repository.all().await?;
        Ok(stats::compute_stats(&products))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
