use crate::models::*;
use crate::services::PincodeService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/pincodes",
    tag = "pincode",
    responses(
        (status = 200, description = "All pincodes", body = [Pincode])
    )
)]
pub async fn get_pincodes(pincode_service: web::Data<PincodeService>) -> Result<HttpResponse> {
    match pincode_service.list().await {
        Ok(pincodes) => Ok(HttpResponse::Ok().json(pincodes)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/pincodes",
    tag = "pincode",
    request_body = CreatePincodeRequest,
    responses(
        (status = 201, description = "Pincode created", body = Pincode),
        (status = 400, description = "Missing code or duplicate pincode")
    )
)]
pub async fn create_pincode(
    pincode_service: web::Data<PincodeService>,
    request: web::Json<CreatePincodeRequest>,
) -> Result<HttpResponse> {
    match pincode_service.create(request.into_inner()).await {
        Ok(pincode) => Ok(HttpResponse::Created().json(pincode)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/pincodes/{pincode_id}",
    tag = "pincode",
    params(("pincode_id" = String, Path, description = "Pincode id")),
    responses(
        (status = 200, description = "Pincode deleted"),
        (status = 404, description = "Pincode not found")
    )
)]
pub async fn delete_pincode(
    pincode_service: web::Data<PincodeService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match pincode_service.delete(&path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/pincodes/verify/{code}",
    tag = "pincode",
    params(("code" = String, Path, description = "Postal code to check")),
    responses(
        (status = 200, description = "Serviceability flag", body = VerifyPincodeResponse)
    )
)]
pub async fn verify_pincode(
    pincode_service: web::Data<PincodeService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match pincode_service.verify(&path.into_inner()).await {
        Ok(valid) => Ok(HttpResponse::Ok().json(VerifyPincodeResponse { valid })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn pincode_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pincodes")
            .route("", web::get().to(get_pincodes))
            .route("", web::post().to(create_pincode))
            .route("/verify/{code}", web::get().to(verify_pincode))
            .route("/{pincode_id}", web::delete().to(delete_pincode)),
    );
}
