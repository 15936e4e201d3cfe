//! HTTP handlers for the Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AdminRole, CallerRole, ObjectIdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, DeletedProduct, Pagination, Product, ProductQuery, ProductType, SortField,
    SortOrder, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::stats::{CategoryBreakdown, ProductStats, TypeBreakdown};

/// Envelope for a single product
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub success: bool,
    pub message: String,
    pub data: Product,
}

/// Envelope for a product listing with pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<Product>,
    pub pagination: Pagination,
}

/// Envelope for a delete receipt
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedProductResponse {
    pub success: bool,
    pub message: String,
    pub data: DeletedProduct,
}

/// Envelope for catalog statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductStatsResponse {
    pub success: bool,
    pub message: String,
    pub data: ProductStats,
}

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        product_stats,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, ProductType, SortField, SortOrder,
            Pagination, DeletedProduct, ProductStats, CategoryBreakdown, TypeBreakdown,
            ProductResponse, ProductListResponse, DeletedProductResponse, ProductStatsResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/stats", get(product_stats))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products retrieved successfully", body = ProductListResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    CallerRole(role): CallerRole,
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> ProductResult<Json<ProductListResponse>> {
    let page = service.list_products(query, role).await?;

    Ok(Json(ProductListResponse {
        success: true,
        message: "Products retrieved successfully".to_string(),
        data: page.products,
        pagination: page.pagination,
    }))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    AdminRole(_role): AdminRole,
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            success: true,
            message: "Product created successfully".to_string(),
            data: product,
        }),
    ))
}

/// Get a product by id
///
/// Private products are reported as absent to non-admin callers.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id (24-char hex)")
    ),
    responses(
        (status = 200, description = "Product retrieved successfully", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    CallerRole(role): CallerRole,
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(&id, role).await?;

    Ok(Json(ProductResponse {
        success: true,
        message: "Product retrieved successfully".to_string(),
        data: product,
    }))
}

/// Update a product
///
/// Partial update over the mutable field set; a payload containing `sku` is
/// rejected.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id (24-char hex)")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    AdminRole(_role): AdminRole,
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.update_product(&id, input).await?;

    Ok(Json(ProductResponse {
        success: true,
        message: "Product updated successfully".to_string(),
        data: product,
    }))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id (24-char hex)")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeletedProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    AdminRole(_role): AdminRole,
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<DeletedProductResponse>> {
    let deleted = service.delete_product(&id).await?;

    Ok(Json(DeletedProductResponse {
        success: true,
        message: "Product deleted successfully".to_string(),
        data: deleted,
    }))
}

/// Get catalog statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Products",
    responses(
        (status = 200, description = "Statistics retrieved successfully", body = ProductStatsResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn product_stats<R: ProductRepository>(
    AdminRole(_role): AdminRole,
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<ProductStatsResponse>> {
    let stats = service.product_stats().await?;

    Ok(Json(ProductStatsResponse {
        success: true,
        message: "Statistics retrieved successfully".to_string(),
        data: stats,
    }))
}
