pub mod auth;
pub mod catalog;
pub mod classes;
pub mod dashboard;
pub mod images;
pub mod questions;
pub mod sessions;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use images::ImageService;
pub use questions::QuestionService;
pub use sessions::SessionService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::middlewares::{RequireJWT, RequireTeacher};
use crate::models::teachers::entities::Teacher;
use crate::models::users::entities::CurrentUser;
use crate::models::{ApiResponse, ErrorCode};

/// 读取启动时注入的共享组件
pub(crate) fn app_data<T: ?Sized + 'static>(request: &HttpRequest) -> Arc<T> {
    request
        .app_data::<actix_web::web::Data<Arc<T>>>()
        .unwrap_or_else(|| panic!("{} not found in app data", std::any::type_name::<T>()))
        .get_ref()
        .clone()
}

/// 后端异常：记录日志，对外只返回通用提示
pub(crate) fn backend_error(
    code: ErrorCode,
    context: &str,
    error: impl std::fmt::Display,
) -> HttpResponse {
    tracing::error!("{}: {}", context, error);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        code,
        "Something went wrong, please try again",
    ))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 不区分“不存在”和“无权访问”
pub(crate) fn not_found_or_denied(code: ErrorCode, what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        code,
        format!("{what} not found or access denied"),
    ))
}

pub(crate) fn current_user(request: &HttpRequest) -> Result<CurrentUser, HttpResponse> {
    RequireJWT::extract_current_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub(crate) fn current_teacher(request: &HttpRequest) -> Result<Teacher, HttpResponse> {
    RequireTeacher::extract_teacher(request).ok_or_else(|| {
        HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Teacher access required",
        ))
    })
}
