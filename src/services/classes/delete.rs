use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, load_owned_class};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{backend_error, current_teacher, not_found_or_denied};

/// 删除班级，成员与会话随之级联删除
pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_class(&storage, class_id, teacher.id).await {
        return Ok(resp);
    }

    match storage.delete_class(class_id).await {
        Ok(true) => {
            tracing::info!("Teacher {} deleted class {}", teacher.email, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
        }
        Ok(false) => Ok(not_found_or_denied(ErrorCode::ClassNotFound, "Class")),
        Err(e) => Ok(backend_error(
            ErrorCode::ClassDeleteFailed,
            "Class deletion failed",
            e,
        )),
    }
}
