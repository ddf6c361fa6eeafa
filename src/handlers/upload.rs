use crate::config::Config;
use crate::error::AppError;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use std::path::Path;
use uuid::Uuid;

fn extension_for(content_type: &str) -> &'static str {
    mime_guess::get_mime_extensions_str(content_type)
        .and_then(|exts| exts.last())
        .copied()
        .unwrap_or("jpg")
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    request_body(content = Vec<u8>, content_type = "image/*"),
    responses(
        (status = 200, description = "Stored image filename and URL"),
        (status = 400, description = "Body missing or not an image")
    )
)]
pub async fn upload_image(
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if body.is_empty() || !content_type.starts_with("image/") {
        return Ok(AppError::ValidationError(
            "No file uploaded or file must be an image".to_string(),
        )
        .error_response());
    }

    let filename = format!("{}.{}", Uuid::new_v4(), extension_for(content_type));
    let uploads_dir = Path::new(&config.storage.uploads_dir);

    let write = async {
        tokio::fs::create_dir_all(uploads_dir).await?;
        tokio::fs::write(uploads_dir.join(&filename), &body).await?;
        Ok::<_, std::io::Error>(())
    };

    match write.await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "filename": filename,
            "url": format!("/uploads/{filename}"),
        }))),
        Err(e) => {
            log::error!("Failed to store uploaded image: {e}");
            Ok(AppError::IoError(e).error_response())
        }
    }
}

pub fn upload_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/upload").route("", web::post().to(upload_image)));
}
