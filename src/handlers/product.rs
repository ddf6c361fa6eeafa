use crate::models::*;
use crate::services::CatalogService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/products",
    tag = "catalog",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products, optionally filtered by category", body = [Product])
    )
)]
pub async fn get_products(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse> {
    match catalog_service.list_products(query.category.as_deref()).await {
        Ok(products) => Ok(HttpResponse::Ok().json(products)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/{product_id}",
    tag = "catalog",
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match catalog_service.get_product(&path.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Ok().json(product)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "catalog",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Name, price, and category are required")
    )
)]
pub async fn create_product(
    catalog_service: web::Data<CatalogService>,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse> {
    match catalog_service.create_product(request.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Created().json(product)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/products/{product_id}",
    tag = "catalog",
    params(("product_id" = String, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<String>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse> {
    match catalog_service
        .update_product(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(product) => Ok(HttpResponse::Ok().json(product)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = "catalog",
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match catalog_service.delete_product(&path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn product_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(get_products))
            .route("", web::post().to(create_product))
            .route("/{product_id}", web::get().to(get_product))
            .route("/{product_id}", web::put().to(update_product))
            .route("/{product_id}", web::delete().to(delete_product)),
    );
}
