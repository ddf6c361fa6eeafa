use crate::config::Config;
use crate::error::AppError;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyPinRequest {
    /// Accepted as string or number; compared as a trimmed string.
    #[schema(value_type = String)]
    pub pin: Option<serde_json::Value>,
}

fn pin_as_string(pin: &Option<serde_json::Value>) -> String {
    match pin {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[utoipa::path(
    post,
    path = "/admin/verify",
    tag = "admin",
    request_body = VerifyPinRequest,
    responses(
        (status = 200, description = "PIN verified"),
        (status = 401, description = "Invalid PIN")
    )
)]
pub async fn verify_pin(
    config: web::Data<Config>,
    request: web::Json<VerifyPinRequest>,
) -> Result<HttpResponse> {
    let received = pin_as_string(&request.pin);
    if received.trim() == config.admin.pin.trim() && !config.admin.pin.trim().is_empty() {
        Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "PIN verified" })))
    } else {
        Ok(AppError::AuthError("Invalid PIN".to_string()).error_response())
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/admin").route("/verify", web::post().to(verify_pin)));
}
