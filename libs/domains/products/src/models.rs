use axum_helpers::auth::Role;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Product visibility classification
///
/// Private products are hidden from non-admin callers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductType {
    /// Visible to every authenticated caller
    #[default]
    Public,
    /// Visible to admins only
    Private,
}

/// Product entity - represents a catalog record stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (24-char hex, stored as _id)
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Stock-keeping unit, globally unique and immutable after creation
    pub sku: String,
    /// Product name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Product category (free-form)
    pub category: String,
    /// Visibility classification
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Unit price, at most 2 fractional digits
    pub price: f64,
    /// Discounted unit price, strictly less than `price` when present
    #[serde(default)]
    pub discount_price: Option<f64>,
    /// Units in stock
    pub quantity: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// True when the value is representable in whole cents.
pub(crate) fn has_two_decimal_places(value: f64) -> bool {
    let cents = value * 100.0;
    (cents - cents.round()).abs() < 1e-9
}

fn precision_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("currency_precision");
    err.message = Some(message.into());
    err
}

fn validate_create_pricing(input: &CreateProduct) -> Result<(), ValidationError> {
    if !has_two_decimal_places(input.price) {
        return Err(precision_error("Price must have at most 2 decimal places"));
    }

    if let Some(discount) = input.discount_price {
        if !has_two_decimal_places(discount) {
            return Err(precision_error(
                "Discount price must have at most 2 decimal places",
            ));
        }
        if discount >= input.price {
            let mut err = ValidationError::new("discount_price");
            err.message = Some("Discount price must be less than original price".into());
            return Err(err);
        }
    }

    Ok(())
}

fn validate_update_pricing(input: &UpdateProduct) -> Result<(), ValidationError> {
    if let Some(price) = input.price {
        if !has_two_decimal_places(price) {
            return Err(precision_error("Price must have at most 2 decimal places"));
        }
    }

    if let Some(discount) = input.discount_price {
        if !has_two_decimal_places(discount) {
            return Err(precision_error(
                "Discount price must have at most 2 decimal places",
            ));
        }
        if let Some(price) = input.price {
            if discount >= price {
                let mut err = ValidationError::new("discount_price");
                err.message = Some("Discount price must be less than original price".into());
                return Err(err);
            }
        }
    }

    Ok(())
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = validate_create_pricing))]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 50, message = "SKU must be between 1 and 50 characters"))]
    pub sku: String,
    #[validate(length(min = 3, max = 200, message = "Name must be between 3 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(
        min = 2,
        max = 100,
        message = "Category must be between 2 and 100 characters"
    ))]
    pub category: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,
    #[validate(range(exclusive_min = 0.0, message = "Discount price must be greater than 0"))]
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[validate(range(min = 0, message = "Quantity must be at least 0"))]
    pub quantity: i64,
}

/// DTO for partially updating an existing product
///
/// Absent fields are left unchanged. `sku` is accepted by the deserializer
/// only so its presence can be rejected: the SKU is immutable after creation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = validate_update_pricing))]
pub struct UpdateProduct {
    pub sku: Option<String>,
    #[validate(length(min = 3, max = 200, message = "Name must be between 3 and 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(
        min = 2,
        max = 100,
        message = "Category must be between 2 and 100 characters"
    ))]
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "Discount price must be greater than 0"))]
    pub discount_price: Option<f64>,
    #[validate(range(min = 0, message = "Quantity must be at least 0"))]
    pub quantity: Option<i64>,
}

impl UpdateProduct {
    /// True when no updatable field is present (`sku` does not count; it is
    /// rejected separately).
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.product_type.is_none()
            && self.price.is_none()
            && self.discount_price.is_none()
            && self.quantity.is_none()
    }
}

/// Sortable fields for product listings
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    Name,
    Price,
    Quantity,
    #[default]
    CreatedAt,
}

impl SortField {
    /// Stored field name this sort key maps to.
    pub fn field_name(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Quantity => "quantity",
            SortField::CreatedAt => "createdAt",
        }
    }
}

/// Sort direction
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// MongoDB sort direction (1 ascending, -1 descending).
    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

fn range_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("price_range");
    err.message = Some(message.into());
    err
}

fn validate_price_range(query: &ProductQuery) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(range_error("minPrice must be less than or equal to maxPrice"));
        }
    }
    Ok(())
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_price_range))]
pub struct ProductQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: i64,
    /// Exact category match
    pub category: Option<String>,
    /// Visibility filter; effective for admin callers only
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
    /// Case-insensitive substring match against name or description
    #[validate(length(max = 200, message = "Search query must be at most 200 characters"))]
    pub search: Option<String>,
    /// Inclusive lower bound on price
    pub min_price: Option<f64>,
    /// Inclusive upper bound on price
    pub max_price: Option<f64>,
    /// Sort field
    #[serde(default)]
    pub sort: SortField,
    /// Sort direction
    #[serde(default)]
    pub order: SortOrder,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            category: None,
            product_type: None,
            search: None,
            min_price: None,
            max_price: None,
            sort: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

/// Effective filter predicate for a listing, after role resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub product_type: Option<ProductType>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Build the effective predicate for a caller.
    ///
    /// Non-admin callers are always restricted to public products, whatever
    /// the requested `type` filter says.
    pub fn for_role(query: &ProductQuery, role: Role) -> Self {
        let product_type = if role.is_admin() {
            query.product_type
        } else {
            Some(ProductType::Public)
        };

        Self {
            category: query.category.clone(),
            product_type,
            search: query.search.clone(),
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

/// Pagination metadata for product listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    /// `items_per_page` must be at least 1 (guaranteed by query validation).
    pub fn new(current_page: u64, items_per_page: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(items_per_page);

        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }
}

/// One page of products plus its pagination metadata
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Receipt returned by the delete operation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeletedProduct {
    pub id: String,
    pub sku: String,
}

impl Product {
    /// Create a new product from a CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new().to_hex(),
            sku: input.sku,
            name: input.name,
            description: input.description,
            category: input.category,
            product_type: input.product_type,
            price: input.price,
            discount_price: input.discount_price,
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateProduct DTO
    ///
    /// `sku` is never applied; the field is immutable after creation.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(product_type) = update.product_type {
            self.product_type = product_type;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(discount_price) = update.discount_price {
            self.discount_price = Some(discount_price);
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        self.updated_at = Utc::now();
    }

    /// Discounted records must stay strictly below their base price.
    pub fn discount_is_valid(&self) -> bool {
        self.discount_price.is_none_or(|d| d < self.price)
    }
}
