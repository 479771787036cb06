use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::ImageService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::backend_error;
use crate::utils::image::OUTPUT_CONTENT_TYPE;

/// 读取已存储的图片；文件名已由路由层校验
pub async fn handle_download(
    service: &ImageService,
    request: &HttpRequest,
    filename: String,
) -> ActixResult<HttpResponse> {
    let objects = service.get_object_storage(request);

    match objects.read(&filename).await {
        Ok(Some(bytes)) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, OUTPUT_CONTENT_TYPE))
            .insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
            .body(bytes)),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Image not found",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::InternalServerError,
            "Failed to read image",
            e,
        )),
    }
}
