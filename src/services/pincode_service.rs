use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use uuid::Uuid;

/// Serviceable-area management. Serviceability is purely the active flag on
/// an exact code match; there is no geographic logic.
#[derive(Clone)]
pub struct PincodeService {
    pool: DbPool,
}

impl PincodeService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Pincode>> {
        let pincodes = sqlx::query_as::<_, Pincode>("SELECT id, code, active FROM pincodes")
            .fetch_all(&self.pool)
            .await?;
        Ok(pincodes)
    }

    pub async fn create(&self, request: CreatePincodeRequest) -> AppResult<Pincode> {
        let Some(code) = request.code.filter(|c| !c.is_empty()) else {
            return Err(AppError::ValidationError("Code is required".to_string()));
        };

        let existing: Option<String> = sqlx::query_scalar("SELECT id FROM pincodes WHERE code = ?")
            .bind(&code)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Pincode already exists".to_string()));
        }

        let pincode = Pincode {
            id: Uuid::new_v4().to_string(),
            code,
            active: request.active.unwrap_or(true),
        };

        sqlx::query("INSERT INTO pincodes (id, code, active) VALUES (?, ?, ?)")
            .bind(&pincode.id)
            .bind(&pincode.code)
            .bind(pincode.active)
            .execute(&self.pool)
            .await?;

        Ok(pincode)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM pincodes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pincode not found".to_string()));
        }
        Ok(())
    }

    /// True iff the code exists and is active; never an error.
    pub async fn verify(&self, code: &str) -> AppResult<bool> {
        let found: Option<String> =
            sqlx::query_scalar("SELECT id FROM pincodes WHERE code = ? AND active = 1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::run_migrations;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> PincodeService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        PincodeService::new(pool)
    }

    fn request(code: &str) -> CreatePincodeRequest {
        CreatePincodeRequest {
            code: Some(code.to_string()),
            active: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_active() {
        let service = test_service().await;
        let pincode = service.create(request("500001")).await.unwrap();
        assert!(pincode.active);
        assert!(service.verify("500001").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_requires_code() {
        let service = test_service().await;
        let err = service
            .create(CreatePincodeRequest {
                code: None,
                active: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let service = test_service().await;
        service.create(request("500001")).await.unwrap();

        let err = service.create(request("500001")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Exactly one record survives.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pincodes WHERE code = '500001'")
            .fetch_one(&service.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_verify_unknown_code() {
        let service = test_service().await;
        assert!(!service.verify("999999").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_inactive_code() {
        let service = test_service().await;
        service
            .create(CreatePincodeRequest {
                code: Some("500002".to_string()),
                active: Some(false),
            })
            .await
            .unwrap();
        assert!(!service.verify("500002").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_removed_code() {
        let service = test_service().await;
        let pincode = service.create(request("500003")).await.unwrap();
        assert!(service.verify("500003").await.unwrap());

        service.delete(&pincode.id).await.unwrap();
        assert!(!service.verify("500003").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let service = test_service().await;
        let err = service.delete("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
