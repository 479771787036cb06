use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::services::ImageService;
use crate::utils::SafeFilename;

// 懒加载的全局 ImageService 实例
static IMAGE_SERVICE: Lazy<ImageService> = Lazy::new(ImageService::new_lazy);

pub async fn handle_upload(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE.handle_upload(&request, payload).await
}

pub async fn handle_download(
    request: HttpRequest,
    filename: SafeFilename,
) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE.handle_download(&request, filename.0).await
}

// 配置路由：上传按用户限流，图片读取公开
pub fn configure_image_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/images")
            .service(
                web::resource("")
                    .wrap(RateLimit::image_upload())
                    .wrap(middlewares::RequireTeacher)
                    .wrap(middlewares::RequireJWT)
                    .route(web::post().to(handle_upload)),
            )
            .route("/{filename}", web::get().to(handle_download)),
    );
}
