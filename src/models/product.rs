use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// Category name, denormalized: deleting a category leaves this as-is.
    pub category: String,
    pub image: String,
    pub in_stock: bool,
    pub description: String,
    pub unit: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub in_stock: Option<bool>,
    pub description: Option<String>,
    pub unit: Option<String>,
}

/// Partial update: only fields that are present and non-null are applied.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub in_stock: Option<bool>,
    pub description: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    pub category: Option<String>,
}
