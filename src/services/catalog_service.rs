use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Category and product CRUD. Products reference categories by name only;
/// deleting a category neither cascades nor blocks.
#[derive(Clone)]
pub struct CatalogService {
    pool: DbPool,
}

impl CatalogService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    // ----- categories -----

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, image, created_at FROM categories",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> AppResult<Category> {
        let Some(name) = request.name.filter(|n| !n.is_empty()) else {
            return Err(AppError::ValidationError("Name is required".to_string()));
        };

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name,
            image: request.image.unwrap_or_default(),
            created_at: Self::now(),
        };

        sqlx::query("INSERT INTO categories (id, name, image, created_at) VALUES (?, ?, ?, ?)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(&category.image)
            .bind(&category.created_at)
            .execute(&self.pool)
            .await?;

        Ok(category)
    }

    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }
        Ok(())
    }

    // ----- products -----

    pub async fn list_products(&self, category: Option<&str>) -> AppResult<Vec<Product>> {
        let products = match category.filter(|c| !c.is_empty()) {
            Some(category) => {
                sqlx::query_as::<_, Product>(
                    "SELECT id, name, price, category, image, in_stock, description, unit, \
                     created_at FROM products WHERE category = ?",
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(
                    "SELECT id, name, price, category, image, in_stock, description, unit, \
                     created_at FROM products",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(products)
    }

    pub async fn get_product(&self, id: &str) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, category, image, in_stock, description, unit, created_at \
             FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    pub async fn create_product(&self, request: CreateProductRequest) -> AppResult<Product> {
        let (Some(name), Some(price), Some(category)) =
            (request.name, request.price, request.category)
        else {
            return Err(AppError::ValidationError(
                "Name, price, and category are required".to_string(),
            ));
        };
        if name.is_empty() || category.is_empty() {
            return Err(AppError::ValidationError(
                "Name, price, and category are required".to_string(),
            ));
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            category,
            image: request.image.unwrap_or_default(),
            in_stock: request.in_stock.unwrap_or(true),
            description: request.description.unwrap_or_default(),
            unit: request.unit.unwrap_or_else(|| "500g".to_string()),
            created_at: Self::now(),
        };

        sqlx::query(
            "INSERT INTO products (id, name, price, category, image, in_stock, description, \
             unit, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.category)
        .bind(&product.image)
        .bind(product.in_stock)
        .bind(&product.description)
        .bind(&product.unit)
        .bind(&product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Partial update: only fields present in the request are applied. The
    /// id and creation timestamp never change.
    pub async fn update_product(
        &self,
        id: &str,
        request: UpdateProductRequest,
    ) -> AppResult<Product> {
        let mut product = self.get_product(id).await?;

        if let Some(name) = request.name {
            product.name = name;
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if let Some(category) = request.category {
            product.category = category;
        }
        if let Some(image) = request.image {
            product.image = image;
        }
        if let Some(in_stock) = request.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(description) = request.description {
            product.description = description;
        }
        if let Some(unit) = request.unit {
            product.unit = unit;
        }

        sqlx::query(
            "UPDATE products SET name = ?, price = ?, category = ?, image = ?, in_stock = ?, \
             description = ?, unit = ? WHERE id = ?",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.category)
        .bind(&product.image)
        .bind(product.in_stock)
        .bind(&product.description)
        .bind(&product.unit)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::run_migrations;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> CatalogService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        CatalogService::new(pool)
    }

    fn chicken_breast() -> CreateProductRequest {
        CreateProductRequest {
            name: Some("Chicken Breast".to_string()),
            price: Some(280.0),
            category: Some("Chicken".to_string()),
            image: None,
            in_stock: None,
            description: None,
            unit: None,
        }
    }

    #[tokio::test]
    async fn test_create_product_defaults() {
        let service = test_service().await;
        let product = service.create_product(chicken_breast()).await.unwrap();

        assert_eq!(product.image, "");
        assert!(product.in_stock);
        assert_eq!(product.description, "");
        assert_eq!(product.unit, "500g");

        let fetched = service.get_product(&product.id).await.unwrap();
        assert_eq!(fetched.name, "Chicken Breast");
    }

    #[tokio::test]
    async fn test_create_product_requires_core_fields() {
        let service = test_service().await;
        let mut request = chicken_breast();
        request.price = None;

        let err = service.create_product(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_partial_update_leaves_other_fields() {
        let service = test_service().await;
        let product = service.create_product(chicken_breast()).await.unwrap();

        let updated = service
            .update_product(
                &product.id,
                UpdateProductRequest {
                    price: Some(300.0),
                    in_stock: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 300.0);
        assert!(!updated.in_stock);
        // Untouched fields and immutables.
        assert_eq!(updated.name, "Chicken Breast");
        assert_eq!(updated.unit, "500g");
        assert_eq!(updated.id, product.id);
        assert_eq!(updated.created_at, product.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let service = test_service().await;
        let err = service
            .update_product("missing", UpdateProductRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_products_by_category() {
        let service = test_service().await;
        service.create_product(chicken_breast()).await.unwrap();
        service
            .create_product(CreateProductRequest {
                name: Some("Mutton Keema".to_string()),
                price: Some(700.0),
                category: Some("Mutton".to_string()),
                image: None,
                in_stock: None,
                description: None,
                unit: None,
            })
            .await
            .unwrap();

        assert_eq!(service.list_products(None).await.unwrap().len(), 2);
        let chicken = service.list_products(Some("Chicken")).await.unwrap();
        assert_eq!(chicken.len(), 1);
        assert_eq!(chicken[0].name, "Chicken Breast");
    }

    #[tokio::test]
    async fn test_category_delete_orphans_products() {
        let service = test_service().await;
        let category = service
            .create_category(CreateCategoryRequest {
                name: Some("Chicken".to_string()),
                image: None,
            })
            .await
            .unwrap();
        let product = service.create_product(chicken_breast()).await.unwrap();

        service.delete_category(&category.id).await.unwrap();

        // No cascade: the product keeps its plain-text category reference.
        let fetched = service.get_product(&product.id).await.unwrap();
        assert_eq!(fetched.category, "Chicken");
    }

    #[tokio::test]
    async fn test_delete_unknown_entities() {
        let service = test_service().await;
        assert!(matches!(
            service.delete_category("missing").await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            service.delete_product("missing").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
