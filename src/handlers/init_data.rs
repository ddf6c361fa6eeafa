use crate::services::SeedService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/init-data",
    tag = "admin",
    responses(
        (status = 200, description = "Starter catalog seeded, or already present")
    )
)]
pub async fn init_data(seed_service: web::Data<SeedService>) -> Result<HttpResponse> {
    match seed_service.init_default_data().await {
        Ok(message) => Ok(HttpResponse::Ok().json(json!({ "message": message }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn init_data_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/init-data").route("", web::post().to(init_data)));
}
