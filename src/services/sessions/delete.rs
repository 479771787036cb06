use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SessionService, load_session};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{backend_error, current_teacher, not_found_or_denied};

pub async fn delete_session(
    service: &SessionService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let session = match load_session(&storage, session_id).await {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };
    if session.teacher_id != teacher.id {
        return Ok(not_found_or_denied(ErrorCode::SessionNotFound, "Session"));
    }

    match storage.delete_session(session_id).await {
        Ok(true) => {
            info!("Teacher {} deleted session {}", teacher.email, session_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Session deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found_or_denied(ErrorCode::SessionNotFound, "Session")),
        Err(e) => Ok(backend_error(
            ErrorCode::InternalServerError,
            "Session deletion failed",
            e,
        )),
    }
}
