use crate::database::DbPool;
use crate::error::AppResult;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Idempotent starter-catalog seeding: a no-op whenever any category
/// already exists.
#[derive(Clone)]
pub struct SeedService {
    pool: DbPool,
}

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    (
        "Chicken",
        "https://images.unsplash.com/photo-1682991136736-a2b44623eeba?w=400",
    ),
    (
        "Mutton",
        "https://images.unsplash.com/photo-1708974140638-8554bc01690d?w=400",
    ),
    (
        "Others",
        "https://images.unsplash.com/photo-1627038259646-04600f5167a3?w=400",
    ),
];

const DEFAULT_PINCODES: &[&str] = &["500001", "500002", "500003", "500004"];

// (name, price, category, image, description, unit)
const DEFAULT_PRODUCTS: &[(&str, f64, &str, &str, &str, &str)] = &[
    (
        "Chicken Breast",
        280.0,
        "Chicken",
        "https://images.unsplash.com/photo-1604503468506-a8da13d82791?w=400",
        "Boneless chicken breast, tender and fresh",
        "500g",
    ),
    (
        "Chicken Curry Cut",
        220.0,
        "Chicken",
        "https://images.unsplash.com/photo-1587593810167-a84920ea0781?w=400",
        "Fresh curry cut chicken pieces with bone",
        "500g",
    ),
    (
        "Chicken Wings",
        200.0,
        "Chicken",
        "https://images.unsplash.com/photo-1527477396000-e27163b481c2?w=400",
        "Fresh chicken wings, perfect for frying",
        "500g",
    ),
    (
        "Chicken Drumsticks",
        240.0,
        "Chicken",
        "https://images.unsplash.com/photo-1598103442097-8b74394b95c6?w=400",
        "Juicy chicken drumsticks",
        "500g",
    ),
    (
        "Mutton Curry Cut",
        650.0,
        "Mutton",
        "https://images.unsplash.com/photo-1603048297172-c92544798d5a?w=400",
        "Premium goat meat curry cut with bone",
        "500g",
    ),
    (
        "Mutton Boneless",
        800.0,
        "Mutton",
        "https://images.unsplash.com/photo-1602470520998-f4a52199a3d6?w=400",
        "Tender boneless mutton pieces",
        "500g",
    ),
    (
        "Mutton Keema",
        700.0,
        "Mutton",
        "https://images.unsplash.com/photo-1599921841143-819065a55cc6?w=400",
        "Fresh minced mutton",
        "500g",
    ),
    (
        "Fish Fillet",
        450.0,
        "Others",
        "https://images.unsplash.com/photo-1519708227418-c8fd9a32b7a2?w=400",
        "Fresh boneless fish fillet",
        "500g",
    ),
    (
        "Prawns",
        550.0,
        "Others",
        "https://images.unsplash.com/photo-1565680018434-b513d5e5fd47?w=400",
        "Fresh medium-sized prawns",
        "500g",
    ),
    (
        "Eggs (12 pcs)",
        90.0,
        "Others",
        "https://images.unsplash.com/photo-1582722872445-44dc5f7e3c8f?w=400",
        "Farm fresh eggs, pack of 12",
        "12 pcs",
    ),
];

impl SeedService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn init_default_data(&self) -> AppResult<&'static str> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        if existing > 0 {
            return Ok("Data already initialized");
        }

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        for (name, image) in DEFAULT_CATEGORIES {
            sqlx::query("INSERT INTO categories (id, name, image, created_at) VALUES (?, ?, ?, ?)")
                .bind(Uuid::new_v4().to_string())
                .bind(name)
                .bind(image)
                .bind(&now)
                .execute(&self.pool)
                .await?;
        }

        for code in DEFAULT_PINCODES {
            sqlx::query("INSERT INTO pincodes (id, code, active) VALUES (?, ?, 1)")
                .bind(Uuid::new_v4().to_string())
                .bind(code)
                .execute(&self.pool)
                .await?;
        }

        for (name, price, category, image, description, unit) in DEFAULT_PRODUCTS {
            sqlx::query(
                "INSERT INTO products (id, name, price, category, image, in_stock, description, \
                 unit, created_at) VALUES (?, ?, ?, ?, ?, 1, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(name)
            .bind(price)
            .bind(category)
            .bind(image)
            .bind(description)
            .bind(unit)
            .bind(&now)
            .execute(&self.pool)
            .await?;
        }

        log::info!(
            "Seeded starter catalog: {} categories, {} pincodes, {} products",
            DEFAULT_CATEGORIES.len(),
            DEFAULT_PINCODES.len(),
            DEFAULT_PRODUCTS.len()
        );
        Ok("Data initialized successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::run_migrations;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> SeedService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        SeedService::new(pool)
    }

    #[tokio::test]
    async fn test_seed_populates_starter_catalog() {
        let service = test_service().await;
        let message = service.init_default_data().await.unwrap();
        assert_eq!(message, "Data initialized successfully");

        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&service.pool)
            .await
            .unwrap();
        let pincodes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pincodes")
            .fetch_one(&service.pool)
            .await
            .unwrap();
        assert_eq!(products, 10);
        assert_eq!(pincodes, 4);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let service = test_service().await;
        service.init_default_data().await.unwrap();

        let message = service.init_default_data().await.unwrap();
        assert_eq!(message, "Data already initialized");

        let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&service.pool)
            .await
            .unwrap();
        assert_eq!(categories, 3);
    }
}
