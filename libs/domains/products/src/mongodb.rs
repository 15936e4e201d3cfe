//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, SortField, SortOrder};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

/// True when the server rejected a write because of a unique index violation.
fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => write_error.code == 11000,
        _ => false,
    }
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for uniqueness enforcement and query performance
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            // Unique SKU index - the authoritative duplicate check
            IndexModel::builder()
                .keys(doc! { "sku": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_sku_unique".to_string())
                        .build(),
                )
                .build(),
            // Category + type for role-filtered listings
            IndexModel::builder()
                .keys(doc! { "category": 1, "type": 1, "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_type".to_string())
                        .build(),
                )
                .build(),
            // Price range queries
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_price".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a MongoDB filter document from a ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut document = doc! {};

        if let Some(product_type) = filter.product_type {
            document.insert("type", product_type.to_string());
        }

        if let Some(ref category) = filter.category {
            document.insert("category", category);
        }

        // Inclusive price range
        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut price_filter = doc! {};
            if let Some(min) = filter.min_price {
                price_filter.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                price_filter.insert("$lte", max);
            }
            document.insert("price", price_filter);
        }

        if let Some(ref search) = filter.search {
            document.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": search, "$options": "i" } },
                    doc! { "description": { "$regex": search, "$options": "i" } },
                ],
            );
        }

        document
    }

    /// Build the sort document for a listing
    fn sort_doc(sort: SortField, order: SortOrder) -> Document {
        let mut document = Document::new();
        document.insert(sort.field_name(), order.direction());
        document
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(sku = %input.sku))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        match self.collection.insert_one(&product).await {
            Ok(_) => {
                tracing::info!(product_id = %product.id, "Product created successfully");
                Ok(product)
            }
            Err(e) if is_duplicate_key_error(&e) => {
                Err(ProductError::DuplicateSku(product.sku))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn exists_by_sku(&self, sku: &str) -> ProductResult<bool> {
        let count = self.collection.count_documents(doc! { "sku": sku }).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        filter: &ProductFilter,
        sort: SortField,
        order: SortOrder,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let options = FindOptions::builder()
            .sort(Self::sort_doc(sort, order))
            .skip(skip)
            .limit(limit)
            .build();

        let cursor = self
            .collection
            .find(Self::build_filter(filter))
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: &Product) -> ProductResult<()> {
        let result = self
            .collection
            .replace_one(doc! { "_id": &product.id }, product)
            .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(product.id.clone()));
        }

        tracing::info!(product_id = %product.id, "Product updated successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<Option<Product>> {
        let deleted = self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await?;

        if deleted.is_some() {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }

        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn all(&self) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductType;

    #[test]
    fn test_build_filter_empty() {
        let filter = ProductFilter::default();
        let document = MongoProductRepository::build_filter(&filter);
        assert!(document.is_empty());
    }

    #[test]
    fn test_build_filter_with_type() {
        let filter = ProductFilter {
            product_type: Some(ProductType::Public),
            ..Default::default()
        };
        let document = MongoProductRepository::build_filter(&filter);
        assert_eq!(document.get_str("type").unwrap(), "public");
    }

    #[test]
    fn test_build_filter_with_category() {
        let filter = ProductFilter {
            category: Some("Tools".to_string()),
            ..Default::default()
        };
        let document = MongoProductRepository::build_filter(&filter);
        assert_eq!(document.get_str("category").unwrap(), "Tools");
    }

    #[test]
    fn test_build_filter_with_price_range() {
        let filter = ProductFilter {
            min_price: Some(10.0),
            max_price: Some(50.0),
            ..Default::default()
        };
        let document = MongoProductRepository::build_filter(&filter);

        let price = document.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 10.0);
        assert_eq!(price.get_f64("$lte").unwrap(), 50.0);
    }

    #[test]
    fn test_build_filter_with_min_price_only() {
        let filter = ProductFilter {
            min_price: Some(10.0),
            ..Default::default()
        };
        let document = MongoProductRepository::build_filter(&filter);

        let price = document.get_document("price").unwrap();
        assert!(price.get("$gte").is_some());
        assert!(price.get("$lte").is_none());
    }

    #[test]
    fn test_build_filter_with_search() {
        let filter = ProductFilter {
            search: Some("widget".to_string()),
            ..Default::default()
        };
        let document = MongoProductRepository::build_filter(&filter);
        assert!(document.contains_key("$or"));
    }

    #[test]
    fn test_build_filter_combines_conditions() {
        let filter = ProductFilter {
            category: Some("Tools".to_string()),
            product_type: Some(ProductType::Private),
            search: Some("drill".to_string()),
            min_price: Some(5.0),
            max_price: None,
        };
        let document = MongoProductRepository::build_filter(&filter);

        assert!(document.contains_key("category"));
        assert!(document.contains_key("type"));
        assert!(document.contains_key("price"));
        assert!(document.contains_key("$or"));
    }

    #[test]
    fn test_sort_doc_maps_field_and_direction() {
        let document = MongoProductRepository::sort_doc(SortField::Price, SortOrder::Asc);
        assert_eq!(document.get_i32("price").unwrap(), 1);

        let document = MongoProductRepository::sort_doc(SortField::CreatedAt, SortOrder::Desc);
        assert_eq!(document.get_i32("createdAt").unwrap(), -1);
    }
}
