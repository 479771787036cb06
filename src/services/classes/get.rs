use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, load_owned_class};
use crate::models::{ApiResponse, ErrorCode, classes::responses::ClassDetailResponse};
use crate::services::{backend_error, current_teacher};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let class = match load_owned_class(&storage, class_id, teacher.id).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    match storage.list_class_members(class_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassDetailResponse { class, members },
            "Class information retrieved successfully",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::InternalServerError,
            "Failed to load class members",
            e,
        )),
    }
}
