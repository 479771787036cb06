use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::catalog::requests::{CreateCourseRequest, CreateTagRequest};
use crate::services::CatalogService;

// 懒加载的全局 CatalogService 实例
static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);

pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    course: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_course(&req, course.into_inner())
        .await
}

pub async fn list_tags(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_tags(&req).await
}

pub async fn create_tag(
    req: HttpRequest,
    tag: web::Json<CreateTagRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.create_tag(&req, tag.into_inner()).await
}

// 配置路由：读取对所有登录用户开放，创建仅限教师
pub fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_courses))
            .route(
                "",
                web::post()
                    .to(create_course)
                    .wrap(middlewares::RequireTeacher),
            ),
    )
    .service(
        web::scope("/api/v1/tags")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_tags))
            .route(
                "",
                web::post().to(create_tag).wrap(middlewares::RequireTeacher),
            ),
    );
}
