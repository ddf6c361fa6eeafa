use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Pincode {
    pub id: String,
    pub code: String,
    pub active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePincodeRequest {
    pub code: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyPincodeResponse {
    pub valid: bool,
}
