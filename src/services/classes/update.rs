use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, load_owned_class};
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};
use crate::services::{backend_error, bad_request, current_teacher, not_found_or_denied};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };

    if let Some(name) = update_data.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(bad_request(
                ErrorCode::ClassUpdateFailed,
                "Class name cannot be empty",
            ));
        }
    }

    let storage = service.get_storage(request);
    if let Err(resp) = load_owned_class(&storage, class_id, teacher.id).await {
        return Ok(resp);
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class updated successfully",
        ))),
        Ok(None) => Ok(not_found_or_denied(ErrorCode::ClassNotFound, "Class")),
        Err(e) => Ok(backend_error(
            ErrorCode::ClassUpdateFailed,
            "Class update failed",
            e,
        )),
    }
}
